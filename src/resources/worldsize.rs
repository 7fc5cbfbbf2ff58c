//! World size resource.
//!
//! Stores the playfield dimensions in world units. Actors that stay in the
//! world are clamped to `[0, width - box width]` x `[0, height - box height]`,
//! and the bottom edge acts as the floor for gravity.

use bevy_ecs::prelude::Resource;

/// Current world size in world units.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WorldSize {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

impl WorldSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}
