//! Animation completion events.
//!
//! When a sprite loop started in run-once mode plays its last frame, an
//! [`AnimationFinishedEvent`] is triggered for the owning entity. The sprite
//! is already back on frame 1 and its loop released.
//!
//! # Example
//!
//! ```ignore
//! world.add_observer(|trigger: On<AnimationFinishedEvent>, mut commands: Commands| {
//!     commands.entity(trigger.event().entity).despawn();
//! });
//! ```

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationFinishedEvent {
    pub entity: Entity,
}

pub fn observe_animation_finished(trigger: On<AnimationFinishedEvent>) {
    debug!("Animation of {:?} finished", trigger.event().entity);
}
