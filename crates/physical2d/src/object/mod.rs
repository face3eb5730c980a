mod bending;
mod entity;
mod render;

pub use bending::{BendingError, BendingMultiples, BendingState, StepDescriptor};
pub use entity::{ObjectProps, PhysicalObject2D, SyncOptions};
pub use render::RenderPose;
