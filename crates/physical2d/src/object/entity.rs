use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{BendingMultiples, BendingState, RenderPose};
use crate::math::normalize_angle;
use crate::physics::{PhysicsBodies, PhysicsBody, RigidBodyHandle};
use crate::schema::{NetScheme, Schema, WireType};

/// Initial values handed over by the entity registry. Missing fields default
/// to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectProps {
    pub position: Option<Vec2>,
    pub velocity: Option<Vec2>,
    pub angle: Option<f32>,
    pub angular_velocity: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOptions {
    pub keep_velocity: bool,
}

impl SyncOptions {
    pub fn keep_velocity() -> Self {
        Self {
            keep_velocity: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhysicalObject2D {
    pub id: u32,
    pub owner_id: i16,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Radians in `[0, TAU)`.
    pub angle: f32,
    pub angular_velocity: f32,
    pub multiples: BendingMultiples,
    pub physics_handle: Option<RigidBodyHandle>,
    pub(super) bending: Option<BendingState>,
}

impl PhysicalObject2D {
    pub fn new(id: u32, props: ObjectProps) -> Self {
        Self {
            id,
            owner_id: 0,
            position: props.position.unwrap_or(Vec2::ZERO),
            velocity: props.velocity.unwrap_or(Vec2::ZERO),
            angle: normalize_angle(props.angle.unwrap_or(0.0)),
            angular_velocity: props.angular_velocity.unwrap_or(0.0),
            multiples: BendingMultiples::default(),
            physics_handle: None,
            bending: None,
        }
    }

    pub fn with_owner(mut self, owner_id: i16) -> Self {
        self.owner_id = owner_id;
        self
    }

    pub fn with_multiples(mut self, multiples: BendingMultiples) -> Self {
        self.multiples = multiples;
        self
    }

    /// Detached value copy: no physics binding and no correction in flight.
    pub fn snapshot(&self) -> Self {
        Self {
            physics_handle: None,
            bending: None,
            ..self.clone()
        }
    }

    /// Overwrites the canonical state from `other`. Velocity is left alone
    /// when `options.keep_velocity` is set. A bound body receives the new
    /// state immediately; unbound objects can pass `NoPhysics`.
    pub fn sync_to(
        &mut self,
        other: &Self,
        options: SyncOptions,
        physics: &mut dyn PhysicsBodies,
    ) {
        self.position = other.position;
        self.angle = normalize_angle(other.angle);
        self.angular_velocity = other.angular_velocity;

        if !options.keep_velocity {
            self.velocity = other.velocity;
        }

        self.refresh_to_physics(physics);
    }

    pub fn refresh_from_body(&mut self, body: &dyn PhysicsBody) {
        self.position = body.position();
        self.velocity = body.velocity();
        self.angle = normalize_angle(body.angle());
        self.angular_velocity = body.angular_velocity();
    }

    pub fn refresh_to_body(&self, body: &mut dyn PhysicsBody) {
        body.set_position(self.position);
        body.set_velocity(self.velocity);
        body.set_angle(self.angle);
        body.set_angular_velocity(self.angular_velocity);
    }

    /// Pulls the state the physics engine produced in its last step. Returns
    /// false when the object is not bound to a live body.
    pub fn refresh_from_physics(&mut self, physics: &dyn PhysicsBodies) -> bool {
        let Some(handle) = self.physics_handle else {
            return false;
        };
        let Some(body) = physics.body(handle) else {
            return false;
        };

        self.refresh_from_body(body);
        true
    }

    pub fn refresh_to_physics(&self, physics: &mut dyn PhysicsBodies) -> bool {
        let Some(handle) = self.physics_handle else {
            return false;
        };
        let Some(body) = physics.body_mut(handle) else {
            return false;
        };

        self.refresh_to_body(body);
        true
    }

    pub fn render_pose(&self) -> RenderPose {
        RenderPose::from(self)
    }
}

impl NetScheme for PhysicalObject2D {
    fn net_scheme() -> Schema {
        Schema::new()
            .with("playerId", WireType::Int16)
            .with("position", WireType::ClassInstance)
            .with("angle", WireType::Float32)
            .with("velocity", WireType::ClassInstance)
            .with("angularVelocity", WireType::Float32)
            .extending(&Schema::object())
    }
}

impl fmt::Display for PhysicalObject2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "phyObj2D[{}] player{} Pos={} Vel={} Dir={} AVel={}",
            self.id, self.owner_id, self.position, self.velocity, self.angle, self.angular_velocity
        )
    }
}
