use glam::Vec2;
use physical2d::{BendingMultiples, ReconcileSettings, WorldSettings};

#[derive(Debug, Clone)]
pub struct ReplayConfig {
    pub ticks: u32,
    pub update_interval: u32,
    pub step_ms: f32,
    pub predicted_velocity: Vec2,
    pub authoritative_velocity: Vec2,
    pub predicted_spin: f32,
    pub authoritative_spin: f32,
    pub is_local: bool,
    pub render_steps: u32,
    pub multiples: BendingMultiples,
    pub reconcile: ReconcileSettings,
    pub world: WorldSettings,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            update_interval: 6,
            step_ms: 1000.0 / 60.0,
            predicted_velocity: Vec2::new(4.0, 0.0),
            authoritative_velocity: Vec2::new(3.5, 0.5),
            predicted_spin: 1.0,
            authoritative_spin: 0.8,
            is_local: false,
            render_steps: 0,
            multiples: BendingMultiples::default(),
            reconcile: ReconcileSettings::default(),
            world: WorldSettings::default(),
        }
    }
}
