use bevy_ecs::prelude::Component;

/// Marks a box that actors collide with and can stand on.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Solid;
