//! Per-frame logical input resources.
//!
//! The host translates whatever devices it has (keyboard, touch, gamepad)
//! into logical direction tokens and writes them into [`InputState`]. The
//! pointer position, already mapped into world coordinates, goes into
//! [`Pointer`]. Both are optional: systems that need them log a warning
//! once and do nothing when they are missing.
use bevy_ecs::prelude::*;

use crate::components::intent::Directions;

/// Boolean input state with edge flags for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolState {
    /// Whether the input is currently held.
    pub active: bool,
    /// Whether the input went down this frame.
    pub just_pressed: bool,
    /// Whether the input went up this frame.
    pub just_released: bool,
}

impl BoolState {
    pub fn set(&mut self, active: bool) {
        if active && !self.active {
            self.just_pressed = true;
        } else if !active && self.active {
            self.just_released = true;
        }
        self.active = active;
    }

    fn clear_edges(&mut self) {
        self.just_pressed = false;
        self.just_released = false;
    }
}

/// Resource holding the state of each logical direction.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    pub up: BoolState,
    pub down: BoolState,
    pub left: BoolState,
    pub right: BoolState,
    pub jump: BoolState,
}

impl InputState {
    fn states_mut(&mut self) -> [(Directions, &mut BoolState); 5] {
        [
            (Directions::UP, &mut self.up),
            (Directions::DOWN, &mut self.down),
            (Directions::LEFT, &mut self.left),
            (Directions::RIGHT, &mut self.right),
            (Directions::JUMP, &mut self.jump),
        ]
    }

    /// Set every direction in `directions` to `active`.
    pub fn set(&mut self, directions: Directions, active: bool) {
        for (flag, state) in self.states_mut() {
            if directions.contains(flag) {
                state.set(active);
            }
        }
    }

    pub fn press(&mut self, directions: Directions) {
        self.set(directions, true);
    }

    pub fn release(&mut self, directions: Directions) {
        self.set(directions, false);
    }

    /// Clear the edge flags; call once at the start of every host frame.
    pub fn begin_frame(&mut self) {
        for (_, state) in self.states_mut() {
            state.clear_edges();
        }
    }

    /// Directions currently held.
    pub fn directions(&self) -> Directions {
        let mut held = Directions::empty();
        held.set(Directions::UP, self.up.active);
        held.set(Directions::DOWN, self.down.active);
        held.set(Directions::LEFT, self.left.active);
        held.set(Directions::RIGHT, self.right.active);
        held.set(Directions::JUMP, self.jump.active);
        held
    }
}

/// Pointer position in world coordinates and its button state.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
    pub button: BoolState,
}

impl Pointer {
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn begin_frame(&mut self) {
        self.button.clear_edges();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release_set_edges() {
        let mut input = InputState::default();
        input.press(Directions::LEFT | Directions::JUMP);
        assert!(input.left.just_pressed);
        assert_eq!(input.directions(), Directions::LEFT | Directions::JUMP);

        input.begin_frame();
        assert!(!input.left.just_pressed);
        assert!(input.left.active);

        input.release(Directions::LEFT);
        assert!(input.left.just_released);
        assert_eq!(input.directions(), Directions::JUMP);
    }

    #[test]
    fn repeated_press_is_not_a_new_edge() {
        let mut state = BoolState::default();
        state.set(true);
        state.clear_edges();
        state.set(true);
        assert!(!state.just_pressed);
    }
}
