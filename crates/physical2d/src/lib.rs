pub mod config;
pub mod math;
pub mod object;
pub mod physics;
pub mod schema;

pub use config::{DEFAULT_TICK_RATE, ReconcileSettings, WorldSettings};
pub use math::{
    interpolate_delta_with_wrapping, interpolate_with_wrapping, normalize_angle,
    shortest_angular_delta,
};
pub use object::{
    BendingError, BendingMultiples, BendingState, ObjectProps, PhysicalObject2D, RenderPose,
    StepDescriptor, SyncOptions,
};
pub use physics::{
    KinematicBody, NoPhysics, PhysicsBodies, PhysicsBody, PhysicsSync, PhysicsWorld,
    RigidBodyHandle,
};
pub use schema::{NetScheme, Schema, SchemaError, SchemaRegistry, WireType};
