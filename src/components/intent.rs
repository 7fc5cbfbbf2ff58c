//! Input-driven movement intent.
//!
//! Actors do not read input devices. Every physics step they consume a
//! [`MoveIntent`]: the set of logical direction tokens active for that step.
//! Player entities get theirs copied from the shared input resource by the
//! player input system; scripted actors can have it written by anything.

use bevy_ecs::prelude::Component;
use bitflags::bitflags;

bitflags! {
    /// Logical direction tokens, independent of keyboard, touch or gamepad.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Directions: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
        const LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const JUMP = 1 << 4;
    }
}

impl Directions {
    /// Horizontal input as -1, 0 or 1. Opposite keys cancel out.
    pub fn horizontal(self) -> f32 {
        (self.contains(Directions::RIGHT) as i8 - self.contains(Directions::LEFT) as i8) as f32
    }

    /// Vertical input as -1 (up), 0 or 1 (down).
    pub fn vertical(self) -> f32 {
        (self.contains(Directions::DOWN) as i8 - self.contains(Directions::UP) as i8) as f32
    }

    /// Jump request for an actor under gravity, where UP doubles as jump.
    pub fn wants_jump(self) -> bool {
        self.intersects(Directions::UP | Directions::JUMP)
    }

    /// Parse a token name such as `"left"` or `"jump"`.
    pub fn from_token(token: &str) -> Option<Directions> {
        match token {
            "up" => Some(Directions::UP),
            "down" => Some(Directions::DOWN),
            "left" => Some(Directions::LEFT),
            "right" => Some(Directions::RIGHT),
            "jump" => Some(Directions::JUMP),
            _ => None,
        }
    }
}

/// Directions active for the current physics step.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent(pub Directions);

impl MoveIntent {
    pub fn new(directions: Directions) -> Self {
        Self(directions)
    }

    pub fn directions(&self) -> Directions {
        self.0
    }
}

/// Marks an entity whose [`MoveIntent`] follows the shared input state.
///
/// Removing the component or despawning the entity releases the binding.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PlayerControlled;
