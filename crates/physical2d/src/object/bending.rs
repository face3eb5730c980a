use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::{PhysicalObject2D, SyncOptions};
use crate::config::{ReconcileSettings, WorldSettings};
use crate::math::{normalize_angle, shortest_angular_delta};
use crate::physics::PhysicsBodies;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BendingError {
    #[error("bending needs at least one increment")]
    ZeroIncrements,
}

/// Per-type overrides of the global bending strength. `None` defers to the
/// next entry in the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BendingMultiples {
    pub bending: Option<f32>,
    pub velocity: Option<f32>,
    pub angle: Option<f32>,
    /// Angle override used only for locally controlled objects.
    pub angle_local: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedBending {
    pub position: f32,
    pub velocity: f32,
    pub angle: f32,
}

impl BendingMultiples {
    pub(crate) fn resolve(&self, global: f32, is_local: bool) -> ResolvedBending {
        let position = self.bending.unwrap_or(global);
        let velocity = self.velocity.unwrap_or(position);
        let mut angle = self.angle.unwrap_or(position);
        if is_local {
            if let Some(local) = self.angle_local {
                angle = local;
            }
        }

        ResolvedBending {
            position,
            velocity,
            angle,
        }
    }
}

/// Milliseconds elapsed in the step being simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepDescriptor {
    pub dt: Option<f32>,
}

impl StepDescriptor {
    pub fn with_dt(dt: f32) -> Self {
        Self { dt: Some(dt) }
    }

    /// A `dt` that is not a positive finite number counts as absent.
    pub fn time_factor(&self, canonical_tick_ms: f32) -> f32 {
        match self.dt {
            Some(dt) if dt.is_finite() && dt > 0.0 => dt / canonical_tick_ms,
            _ => 1.0,
        }
    }
}

/// A correction in flight. Each increment adds the deltas once, scaled by the
/// step's time factor.
#[derive(Debug, Clone)]
pub struct BendingState {
    pub increments: u32,
    pub bending: f32,
    pub increment_scale: f32,
    pub position_delta: Vec2,
    pub velocity_delta: Vec2,
    pub angular_velocity_delta: f32,
    pub angle_delta: f32,
    pub canonical_tick_ms: f32,
    /// Predicted state from before the reset to the authoritative baseline.
    pub target: Box<PhysicalObject2D>,
}

impl fmt::Display for BendingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bend={} increments={} deltaPos={} deltaVel={} deltaAngle={} deltaAVel={}",
            self.bending,
            self.increments,
            self.position_delta,
            self.velocity_delta,
            self.angle_delta,
            self.angular_velocity_delta
        )
    }
}

impl PhysicalObject2D {
    /// Starts a correction: `self` holds the locally predicted state and
    /// `original` the authoritative one just received. The object is reset to
    /// `original` (keeping the predicted velocity) and the divergence is queued
    /// to be reapplied over `bending_increments` ticks. Any unfinished
    /// correction is replaced. A bound body is reset to the baseline too.
    pub fn bend_to_current(
        &mut self,
        original: &PhysicalObject2D,
        bending: f32,
        world: &WorldSettings,
        is_local: bool,
        bending_increments: u32,
        physics: &mut dyn PhysicsBodies,
    ) -> Result<(), BendingError> {
        if bending_increments == 0 {
            log::warn!("refusing to bend object {} with zero increments", self.id);
            return Err(BendingError::ZeroIncrements);
        }

        let strength = self.multiples.resolve(bending, is_local);
        let increments = bending_increments as f32;
        let increment_scale = strength.position / increments;

        let position_delta = (self.position - original.position) * increment_scale;
        let velocity_delta =
            (self.velocity - original.velocity) * (strength.velocity / increments);
        let angular_velocity_delta =
            (self.angular_velocity - original.angular_velocity) * increment_scale;
        let angle_delta =
            shortest_angular_delta(original.angle, self.angle) * strength.angle / increments;

        let target = Box::new(self.snapshot());
        self.sync_to(original, SyncOptions::keep_velocity(), physics);

        let state = BendingState {
            increments: bending_increments,
            bending: strength.position,
            increment_scale,
            position_delta,
            velocity_delta,
            angular_velocity_delta,
            angle_delta,
            canonical_tick_ms: world.canonical_tick_ms(),
            target,
        };
        log::debug!("object {} bending: {}", self.id, state);
        self.bending = Some(state);

        Ok(())
    }

    /// `bend_to_current` with the strength and increment count picked from
    /// `settings` by locality.
    pub fn reconcile(
        &mut self,
        original: &PhysicalObject2D,
        settings: &ReconcileSettings,
        world: &WorldSettings,
        is_local: bool,
        physics: &mut dyn PhysicsBodies,
    ) -> Result<(), BendingError> {
        self.bend_to_current(
            original,
            settings.bending_for(is_local),
            world,
            is_local,
            settings.bending_increments,
            physics,
        )
    }

    /// Applies one increment of the pending correction. Deltas scale with the
    /// step's elapsed time; the increment budget always drops by exactly one.
    /// Returns false when nothing was pending.
    pub fn apply_incremental_bending(&mut self, step: &StepDescriptor) -> bool {
        let Some(state) = self.bending.as_mut() else {
            return false;
        };

        let time_factor = step.time_factor(state.canonical_tick_ms);
        self.position += state.position_delta * time_factor;
        self.velocity += state.velocity_delta * time_factor;
        self.angular_velocity += state.angular_velocity_delta * time_factor;
        self.angle = normalize_angle(self.angle + state.angle_delta * time_factor);

        state.increments -= 1;
        log::trace!(
            "object {} bend increment, {} left (time factor {})",
            self.id,
            state.increments,
            time_factor
        );

        if state.increments == 0 {
            log::debug!("object {} bending complete", self.id);
            self.bending = None;
        }

        true
    }

    pub fn cancel_bending(&mut self) {
        if self.bending.take().is_some() {
            log::debug!("object {} bending cancelled", self.id);
        }
    }

    pub fn bending_increments(&self) -> u32 {
        self.bending.as_ref().map_or(0, |state| state.increments)
    }

    pub fn is_bending(&self) -> bool {
        self.bending.is_some()
    }

    pub fn bending(&self) -> Option<&BendingState> {
        self.bending.as_ref()
    }

    pub fn bending_target(&self) -> Option<&PhysicalObject2D> {
        self.bending.as_ref().map(|state| state.target.as_ref())
    }

    pub fn bending_summary(&self) -> String {
        match &self.bending {
            Some(state) => state.to_string(),
            None => "no bending".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_8, TAU};

    use super::*;
    use crate::object::ObjectProps;
    use crate::physics::{NoPhysics, PhysicsWorld};

    fn object(
        position: Vec2,
        velocity: Vec2,
        angle: f32,
        angular_velocity: f32,
    ) -> PhysicalObject2D {
        PhysicalObject2D::new(
            1,
            ObjectProps {
                position: Some(position),
                velocity: Some(velocity),
                angle: Some(angle),
                angular_velocity: Some(angular_velocity),
            },
        )
    }

    #[test]
    fn multiples_precedence() {
        let none = BendingMultiples::default().resolve(0.5, true);
        assert_eq!(
            none,
            ResolvedBending {
                position: 0.5,
                velocity: 0.5,
                angle: 0.5
            }
        );

        let multiples = BendingMultiples {
            bending: Some(0.8),
            velocity: None,
            angle: Some(0.3),
            angle_local: Some(0.0),
        };
        let remote = multiples.resolve(0.5, false);
        assert_eq!(
            remote,
            ResolvedBending {
                position: 0.8,
                velocity: 0.8,
                angle: 0.3
            }
        );
        let local = multiples.resolve(0.5, true);
        assert_eq!(local.angle, 0.0);

        let velocity_only = BendingMultiples {
            velocity: Some(0.2),
            ..Default::default()
        };
        let resolved = velocity_only.resolve(0.5, false);
        assert_eq!(resolved.position, 0.5);
        assert_eq!(resolved.velocity, 0.2);
    }

    #[test]
    fn time_factor_defaults_to_one() {
        assert_eq!(StepDescriptor::default().time_factor(1000.0 / 60.0), 1.0);
        assert_eq!(StepDescriptor::with_dt(0.0).time_factor(1000.0 / 60.0), 1.0);
        assert_eq!(StepDescriptor::with_dt(f32::NAN).time_factor(1000.0 / 60.0), 1.0);
        assert_eq!(StepDescriptor::with_dt(f32::INFINITY).time_factor(1000.0 / 60.0), 1.0);
        assert_eq!(StepDescriptor::with_dt(-16.0).time_factor(1000.0 / 60.0), 1.0);
        assert_eq!(StepDescriptor::with_dt(50.0).time_factor(25.0), 2.0);
    }

    #[test]
    fn invalid_dt_applies_a_plain_increment() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let mut predicted = object(Vec2::new(4.0, 0.0), Vec2::ZERO, 1.0, 0.0);
        predicted
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                4,
                &mut NoPhysics,
            )
            .unwrap();

        assert!(predicted.apply_incremental_bending(&StepDescriptor::with_dt(f32::NAN)));
        assert!(predicted.position.is_finite());
        assert!((predicted.position - Vec2::new(1.0, 0.0)).length() < 1e-5);
        assert!((predicted.angle - 0.25).abs() < 1e-5);

        assert!(predicted.apply_incremental_bending(&StepDescriptor::with_dt(-5.0)));
        assert!((predicted.position - Vec2::new(2.0, 0.0)).length() < 1e-5);
        assert_eq!(predicted.bending_increments(), 2);
    }

    #[test]
    fn zero_increments_is_rejected_without_side_effects() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let mut predicted = object(Vec2::ONE, Vec2::ONE, 1.0, 1.0);

        let result = predicted.bend_to_current(
            &original,
            1.0,
            &WorldSettings::default(),
            false,
            0,
            &mut NoPhysics,
        );

        assert_eq!(result, Err(BendingError::ZeroIncrements));
        assert_eq!(predicted.position, Vec2::ONE);
        assert!(!predicted.is_bending());
    }

    #[test]
    fn quarter_turn_over_four_increments() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let mut predicted = object(Vec2::ZERO, Vec2::ZERO, FRAC_PI_2, 0.0);

        predicted
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                4,
                &mut NoPhysics,
            )
            .unwrap();
        let state = predicted.bending().unwrap();
        assert!((state.angle_delta - FRAC_PI_8).abs() < 1e-6);
        assert_eq!(predicted.angle, 0.0);

        for _ in 0..4 {
            assert!(predicted.apply_incremental_bending(&StepDescriptor::default()));
        }

        assert!((predicted.angle - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(predicted.bending_increments(), 0);
    }

    #[test]
    fn angle_bends_the_short_way() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 350f32.to_radians(), 0.0);
        let mut predicted = object(Vec2::ZERO, Vec2::ZERO, 10f32.to_radians(), 0.0);

        predicted
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                2,
                &mut NoPhysics,
            )
            .unwrap();
        assert!((predicted.bending().unwrap().angle_delta - 10f32.to_radians()).abs() < 1e-5);

        predicted.apply_incremental_bending(&StepDescriptor::default());
        assert!(predicted.angle.abs() < 1e-4 || (predicted.angle - TAU).abs() < 1e-4);

        predicted.apply_incremental_bending(&StepDescriptor::default());
        assert!((predicted.angle - 10f32.to_radians()).abs() < 1e-4);
    }

    #[test]
    fn local_angle_override_applies_only_when_local() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let multiples = BendingMultiples {
            angle_local: Some(0.0),
            ..Default::default()
        };

        let mut local = object(Vec2::ZERO, Vec2::ZERO, 1.0, 0.0).with_multiples(multiples);
        local
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                true,
                5,
                &mut NoPhysics,
            )
            .unwrap();
        assert_eq!(local.bending().unwrap().angle_delta, 0.0);

        let mut remote = object(Vec2::ZERO, Vec2::ZERO, 1.0, 0.0).with_multiples(multiples);
        remote
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                5,
                &mut NoPhysics,
            )
            .unwrap();
        assert!((remote.bending().unwrap().angle_delta - 0.2).abs() < 1e-6);
    }

    #[test]
    fn velocity_and_angular_velocity_converge() {
        let original = object(Vec2::ZERO, Vec2::new(1.0, 1.0), 0.0, 1.0);
        let mut predicted = object(Vec2::ZERO, Vec2::new(3.0, -1.0), 0.0, 2.0);

        predicted
            .bend_to_current(
                &original,
                0.5,
                &WorldSettings::default(),
                false,
                5,
                &mut NoPhysics,
            )
            .unwrap();
        assert_eq!(predicted.velocity, Vec2::new(3.0, -1.0));
        assert_eq!(predicted.angular_velocity, 1.0);

        while predicted.apply_incremental_bending(&StepDescriptor::default()) {}

        assert!((predicted.velocity - Vec2::new(4.0, -2.0)).length() < 1e-5);
        assert!((predicted.angular_velocity - 1.5).abs() < 1e-5);
    }

    #[test]
    fn velocity_override_sets_its_own_delta() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let multiples = BendingMultiples {
            bending: Some(1.0),
            velocity: Some(0.5),
            ..Default::default()
        };
        let mut predicted =
            object(Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0), 0.0, 0.0).with_multiples(multiples);

        predicted
            .bend_to_current(
                &original,
                0.2,
                &WorldSettings::default(),
                false,
                5,
                &mut NoPhysics,
            )
            .unwrap();

        let state = predicted.bending().unwrap();
        assert!((state.velocity_delta - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!((state.position_delta - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert_eq!(state.bending, 1.0);

        while predicted.apply_incremental_bending(&StepDescriptor::default()) {}
        assert!((predicted.velocity - Vec2::new(15.0, 0.0)).length() < 1e-5);

        let velocity_only = BendingMultiples {
            velocity: Some(0.5),
            ..Default::default()
        };
        let mut predicted = object(Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0), 0.0, 0.0)
            .with_multiples(velocity_only);
        predicted
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                5,
                &mut NoPhysics,
            )
            .unwrap();

        let state = predicted.bending().unwrap();
        assert!((state.velocity_delta - Vec2::new(1.0, 0.0)).length() < 1e-6);
        assert!((state.position_delta - Vec2::new(1.0, 0.0)).length() < 1e-6);

        let mut plain = object(Vec2::new(5.0, 0.0), Vec2::new(10.0, 0.0), 0.0, 0.0);
        plain
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                5,
                &mut NoPhysics,
            )
            .unwrap();
        assert!((plain.bending().unwrap().velocity_delta - Vec2::new(2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn baseline_reset_reaches_bound_body() {
        let mut world = PhysicsWorld::new();
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.5, 0.0);
        let mut predicted = object(Vec2::new(6.0, 0.0), Vec2::new(1.0, 0.0), 1.0, 0.0);
        let handle = world.add_kinematic(predicted.position, predicted.angle);
        predicted.physics_handle = Some(handle);

        predicted
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                3,
                &mut world,
            )
            .unwrap();

        assert_eq!(world.body_position(handle), Some(Vec2::ZERO));
        assert_eq!(world.body_velocity(handle), Some(Vec2::new(1.0, 0.0)));
        assert!((world.body_angle(handle).unwrap() - 0.5).abs() < 1e-5);

        let mut remote = object(Vec2::new(10.0, 0.0), Vec2::ZERO, 0.0, 0.0);
        let remote_handle = world.add_kinematic(remote.position, 0.0);
        remote.physics_handle = Some(remote_handle);
        remote
            .reconcile(
                &original,
                &ReconcileSettings::default(),
                &WorldSettings::default(),
                false,
                &mut world,
            )
            .unwrap();
        assert_eq!(world.body_position(remote_handle), Some(Vec2::ZERO));
    }

    #[test]
    fn new_correction_replaces_unfinished_one() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let mut predicted = object(Vec2::new(10.0, 0.0), Vec2::ZERO, 0.0, 0.0);
        let world = WorldSettings::default();

        predicted
            .bend_to_current(&original, 1.0, &world, false, 10, &mut NoPhysics)
            .unwrap();
        predicted.apply_incremental_bending(&StepDescriptor::default());

        let second = object(Vec2::new(0.0, 5.0), Vec2::ZERO, 0.0, 0.0);
        predicted
            .bend_to_current(&second, 1.0, &world, false, 3, &mut NoPhysics)
            .unwrap();

        let state = predicted.bending().unwrap();
        assert_eq!(state.increments, 3);
        assert!((state.position_delta - Vec2::new(1.0 / 3.0, -5.0 / 3.0)).length() < 1e-5);
        assert_eq!(predicted.bending_target().unwrap().position, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn cancel_is_idempotent() {
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let mut predicted = object(Vec2::ONE, Vec2::ZERO, 0.0, 0.0);
        predicted
            .bend_to_current(
                &original,
                1.0,
                &WorldSettings::default(),
                false,
                4,
                &mut NoPhysics,
            )
            .unwrap();

        predicted.cancel_bending();
        predicted.cancel_bending();

        assert_eq!(predicted.bending_increments(), 0);
        assert!(!predicted.apply_incremental_bending(&StepDescriptor::default()));
        assert_eq!(predicted.position, Vec2::ZERO);
        assert_eq!(predicted.bending_summary(), "no bending");
    }

    #[test]
    fn reconcile_uses_locality_defaults() {
        let settings = ReconcileSettings::default();
        let original = object(Vec2::ZERO, Vec2::ZERO, 0.0, 0.0);
        let mut remote = object(Vec2::new(10.0, 0.0), Vec2::ZERO, 0.0, 0.0);

        remote
            .reconcile(
                &original,
                &settings,
                &WorldSettings::default(),
                false,
                &mut NoPhysics,
            )
            .unwrap();

        let state = remote.bending().unwrap();
        assert_eq!(state.increments, 10);
        assert!((state.bending - 0.6).abs() < 1e-6);
        assert!((state.position_delta.x - 0.6).abs() < 1e-5);
        assert!(remote.bending_summary().starts_with("bend=0.6 increments=10"));
    }
}
