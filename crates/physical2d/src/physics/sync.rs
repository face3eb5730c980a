use crate::object::{PhysicalObject2D, StepDescriptor};

use super::{PhysicsBodies, PhysicsWorld};

/// Keeps bound physics bodies in step with the canonical object state.
/// Baseline resets push through `PhysicalObject2D::sync_to` and
/// `bend_to_current`; increments go through here. The engine's results are
/// pulled back after each step.
pub struct PhysicsSync;

impl PhysicsSync {
    pub fn apply_incremental_bending(
        object: &mut PhysicalObject2D,
        step: &StepDescriptor,
        physics: &mut dyn PhysicsBodies,
    ) -> bool {
        if !object.apply_incremental_bending(step) {
            return false;
        }
        object.refresh_to_physics(physics);
        true
    }

    pub fn create_physics_body(
        object: &mut PhysicalObject2D,
        physics: &mut PhysicsWorld,
        radius: f32,
        mass: f32,
    ) {
        if object.physics_handle.is_some() {
            return;
        }

        let handle = physics.add_dynamic_ball(object.position, object.angle, radius, mass);
        object.physics_handle = Some(handle);
        object.refresh_to_physics(physics);
    }

    pub fn destroy_physics_body(object: &mut PhysicalObject2D, physics: &mut PhysicsWorld) {
        if let Some(handle) = object.physics_handle.take() {
            physics.remove_body(handle);
        }
    }
}
