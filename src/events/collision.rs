//! Solid collision notifications.
//!
//! The solid collision system triggers a [`SolidCollisionEvent`] for every
//! solid that displaced an actor during a physics step. Observers can react
//! to it (sounds, damage, breaking blocks) without touching the resolver.
use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;

/// Event fired when an actor was pushed out of a solid.
///
/// `x` and `y` are the displacement applied to the actor. A negative `y`
/// means the actor was pushed up onto the solid.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SolidCollisionEvent {
    pub actor: Entity,
    pub solid: Entity,
    pub x: f32,
    pub y: f32,
}

impl SolidCollisionEvent {
    /// The actor landed on top of the solid.
    pub fn is_landing(&self) -> bool {
        self.y < 0.0
    }
}

/// Log every landing and side hit at debug level.
pub fn observe_solid_collision(trigger: On<SolidCollisionEvent>) {
    let event = trigger.event();
    if event.is_landing() {
        debug!("{:?} landed on {:?}", event.actor, event.solid);
    } else {
        debug!(
            "{:?} pushed out of {:?} by ({}, {})",
            event.actor, event.solid, event.x, event.y
        );
    }
}
