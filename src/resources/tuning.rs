//! Physics and resolver constants.
//!
//! None of these are hard-coded in the resolver; they come from the
//! `[physics]` and `[collision]` config sections.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Vertical acceleration added every physics step while airborne.
    pub gravity: f32,
    /// How close a bottom edge must be to a top edge to count as standing on it.
    pub standing_tolerance: f32,
    /// Gap left after pushing an actor out of a box horizontally.
    pub epsilon_x: f32,
    /// Gap left after pushing an actor out of a box vertically.
    pub epsilon_y: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 21.0,
            standing_tolerance: 1.0,
            epsilon_x: 0.01,
            epsilon_y: 1.0,
        }
    }
}
