mod body;
mod sync;
mod world;

pub use body::{KinematicBody, NoPhysics, PhysicsBodies, PhysicsBody};
pub use sync::PhysicsSync;
pub use world::PhysicsWorld;

pub use rapier2d::dynamics::RigidBodyHandle;
