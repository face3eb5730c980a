use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::PhysicalObject2D;
use crate::math::interpolate_with_wrapping;

/// Display-only copy of an object's pose. Interpolation mutates this value,
/// never the simulated object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderPose {
    pub position: Vec2,
    pub angle: f32,
}

impl From<&PhysicalObject2D> for RenderPose {
    fn from(object: &PhysicalObject2D) -> Self {
        Self {
            position: object.position,
            angle: object.angle,
        }
    }
}

impl RenderPose {
    /// Moves this pose `percent` of the way toward `next`, rotating the short
    /// way around.
    pub fn interpolate(&mut self, next: &RenderPose, percent: f32) {
        let t = percent.clamp(0.0, 1.0);
        self.position = self.position.lerp(next.position, t);
        self.angle = interpolate_with_wrapping(self.angle, next.angle, t, 0.0, TAU);
    }

    pub fn lerp(&self, next: &RenderPose, percent: f32) -> RenderPose {
        let mut pose = *self;
        pose.interpolate(next, percent);
        pose
    }
}
