use glam::Vec2;
use rapier2d::dynamics::{RigidBody, RigidBodyHandle, RigidBodySet};
use rapier2d::math::{Rotation, Vector};

/// The four attributes the bridge mirrors, with copy semantics on both sides.
pub trait PhysicsBody {
    fn position(&self) -> Vec2;
    fn set_position(&mut self, position: Vec2);
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    fn angle(&self) -> f32;
    fn set_angle(&mut self, angle: f32);
    fn angular_velocity(&self) -> f32;
    fn set_angular_velocity(&mut self, angular_velocity: f32);
}

impl PhysicsBody for RigidBody {
    fn position(&self) -> Vec2 {
        let t = self.translation();
        Vec2::new(t.x, t.y)
    }

    fn set_position(&mut self, position: Vec2) {
        self.set_translation(Vector::new(position.x, position.y), true);
    }

    fn velocity(&self) -> Vec2 {
        let v = self.linvel();
        Vec2::new(v.x, v.y)
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.set_linvel(Vector::new(velocity.x, velocity.y), true);
    }

    fn angle(&self) -> f32 {
        self.rotation().angle()
    }

    fn set_angle(&mut self, angle: f32) {
        self.set_rotation(Rotation::new(angle), true);
    }

    fn angular_velocity(&self) -> f32 {
        self.angvel()
    }

    fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.set_angvel(angular_velocity, true);
    }
}

/// Free-standing body for callers that integrate motion themselves.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub angular_velocity: f32,
}

impl KinematicBody {
    /// Explicit Euler step, `dt` in seconds.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.angle += self.angular_velocity * dt;
    }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn set_angle(&mut self, angle: f32) {
        self.angle = angle;
    }

    fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    fn set_angular_velocity(&mut self, angular_velocity: f32) {
        self.angular_velocity = angular_velocity;
    }
}

/// Lookup of bodies owned by a physics engine. A handle that no longer resolves
/// behaves like an unbound entity.
pub trait PhysicsBodies {
    fn body(&self, handle: RigidBodyHandle) -> Option<&dyn PhysicsBody>;
    fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut dyn PhysicsBody>;
}

impl PhysicsBodies for RigidBodySet {
    fn body(&self, handle: RigidBodyHandle) -> Option<&dyn PhysicsBody> {
        self.get(handle).map(|body| body as &dyn PhysicsBody)
    }

    fn body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut dyn PhysicsBody> {
        self.get_mut(handle).map(|body| body as &mut dyn PhysicsBody)
    }
}

/// For entities that are never bound to a physics engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhysics;

impl PhysicsBodies for NoPhysics {
    fn body(&self, _handle: RigidBodyHandle) -> Option<&dyn PhysicsBody> {
        None
    }

    fn body_mut(&mut self, _handle: RigidBodyHandle) -> Option<&mut dyn PhysicsBody> {
        None
    }
}
