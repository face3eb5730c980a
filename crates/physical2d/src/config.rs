use serde::{Deserialize, Serialize};

pub const DEFAULT_TICK_RATE: u32 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSettings {
    pub tick_rate: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

impl WorldSettings {
    /// Reference step length in milliseconds. Bending increments applied over
    /// a step of this length use their deltas unscaled.
    pub fn canonical_tick_ms(&self) -> f32 {
        1000.0 / self.tick_rate.max(1) as f32
    }
}

/// Strengths and duration used when an authoritative update is folded into a
/// predicted object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileSettings {
    pub local_obj_bending: f32,
    pub remote_obj_bending: f32,
    pub bending_increments: u32,
}

impl Default for ReconcileSettings {
    fn default() -> Self {
        Self {
            local_obj_bending: 0.1,
            remote_obj_bending: 0.6,
            bending_increments: 10,
        }
    }
}

impl ReconcileSettings {
    pub fn bending_for(&self, is_local: bool) -> f32 {
        if is_local {
            self.local_obj_bending
        } else {
            self.remote_obj_bending
        }
    }
}
