use anyhow::Result;
use physical2d::{
    KinematicBody, ObjectProps, PhysicalObject2D, PhysicsSync, PhysicsWorld, StepDescriptor,
};

use crate::config::ReplayConfig;

const OBJECT_ID: u32 = 1;

#[derive(Debug, Clone, Default)]
pub struct ReplaySummary {
    pub ticks: u32,
    pub corrections: u32,
    pub max_error: f32,
    pub final_error: f32,
}

/// Client-side prediction against a drifting authoritative object, with the
/// divergence folded back in through bending every `update_interval` ticks.
pub struct Replay {
    config: ReplayConfig,
    physics: PhysicsWorld,
    predicted: PhysicalObject2D,
    authoritative: KinematicBody,
    tick: u32,
    summary: ReplaySummary,
}

impl Replay {
    pub fn new(config: ReplayConfig) -> Self {
        let mut physics = PhysicsWorld::new();
        physics.set_dt(config.step_ms / 1000.0);

        let mut predicted = PhysicalObject2D::new(
            OBJECT_ID,
            ObjectProps {
                velocity: Some(config.predicted_velocity),
                angular_velocity: Some(config.predicted_spin),
                ..Default::default()
            },
        )
        .with_multiples(config.multiples);
        PhysicsSync::create_physics_body(&mut predicted, &mut physics, 0.5, 1.0);

        let authoritative = KinematicBody {
            velocity: config.authoritative_velocity,
            angular_velocity: config.authoritative_spin,
            ..Default::default()
        };

        Self {
            config,
            physics,
            predicted,
            authoritative,
            tick: 0,
            summary: ReplaySummary::default(),
        }
    }

    pub fn run(&mut self) -> Result<ReplaySummary> {
        while self.tick < self.config.ticks {
            self.tick_once()?;
        }
        Ok(self.summary.clone())
    }

    pub fn tick_once(&mut self) -> Result<()> {
        let step = StepDescriptor::with_dt(self.config.step_ms);
        PhysicsSync::apply_incremental_bending(&mut self.predicted, &step, &mut self.physics);

        let previous = self.predicted.render_pose();
        self.physics.step();
        self.predicted.refresh_from_physics(&self.physics);
        self.authoritative.integrate(self.config.step_ms / 1000.0);
        self.tick += 1;

        if self.config.update_interval > 0 && self.tick % self.config.update_interval == 0 {
            self.receive_update()?;
        }

        let current = self.predicted.render_pose();
        let frames = self.config.render_steps + 1;
        for frame in 1..frames {
            let pose = previous.lerp(&current, frame as f32 / frames as f32);
            log::debug!(
                "tick {} frame {}/{} pos={} angle={:.4}",
                self.tick,
                frame,
                frames,
                pose.position,
                pose.angle
            );
        }

        let error = (self.predicted.position - self.authoritative.position).length();
        self.summary.ticks = self.tick;
        self.summary.max_error = self.summary.max_error.max(error);
        self.summary.final_error = error;

        log::info!(
            "tick {:>4} {} err={:.4} {}",
            self.tick,
            self.predicted,
            error,
            self.predicted.bending_summary()
        );
        Ok(())
    }

    fn receive_update(&mut self) -> Result<()> {
        let update = PhysicalObject2D::new(
            OBJECT_ID,
            ObjectProps {
                position: Some(self.authoritative.position),
                velocity: Some(self.authoritative.velocity),
                angle: Some(self.authoritative.angle),
                angular_velocity: Some(self.authoritative.angular_velocity),
            },
        );

        self.predicted.reconcile(
            &update,
            &self.config.reconcile,
            &self.config.world,
            self.config.is_local,
            &mut self.physics,
        )?;
        self.summary.corrections += 1;
        Ok(())
    }
}
