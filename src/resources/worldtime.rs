//! Simulated time.
//!
//! [`WorldTime`] is advanced once per physics sub-step. Actors only see the
//! sub-step `delta` and the simulated `elapsed` time, never the host clock.

use bevy_ecs::prelude::Resource;

/// Anything that can hand out a per-step delta.
pub trait DeltaSource {
    /// Length of the current step in seconds.
    fn delta(&self) -> f32;
    /// Whether time is advancing at all.
    fn is_running(&self) -> bool;
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    /// Multiplier applied to every delta. Zero freezes the simulation.
    pub time_scale: f32,
    /// Physics steps taken so far.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, time_scale: f32) -> Self {
        self.time_scale = time_scale.max(0.0);
        self
    }
}

impl DeltaSource for WorldTime {
    fn delta(&self) -> f32 {
        self.delta
    }

    fn is_running(&self) -> bool {
        self.time_scale > 0.0
    }
}
