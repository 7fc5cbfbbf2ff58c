//! Gravity and jumping.
//!
//! An entity with an enabled [`Gravity`] component falls while airborne and
//! can jump. The jump state machine has three states (see [`AirState`]):
//!
//! ```text
//!              jump input (allowed)
//!   Grounded ────────────────────────► Jumping ──┐
//!      ▲  │                               │      │ jump input (multi-jump)
//!      │  │ walks off a ledge             │      └──► Jumping
//!      │  ▼                               │
//!      │ Falling ◄────────────────────────┘ (gravity keeps accruing)
//!      │  │
//!      └──┘ lands on a solid or the world floor
//! ```
//!
//! While airborne, horizontal motion keeps the momentum recorded at take-off
//! (or when walking off a ledge) and blends in player steering by
//! `air_control`.

use bevy_ecs::prelude::Component;
use log::debug;

use crate::components::kinematics::{Facing, Kinematics};

/// Horizontal input held when the last jump started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpDirection {
    pub left: bool,
    pub right: bool,
}

impl JumpDirection {
    fn sign(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// Discrete airborne state derived from [`Gravity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AirState {
    Grounded,
    Jumping,
    Falling,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Gravity {
    /// Gravity can be switched off without removing the component.
    pub enabled: bool,
    /// Upward speed given by a jump, in world units per second.
    pub jump_velocity: f32,
    /// Minimum seconds between two jumps.
    pub jump_delay: f32,
    /// Jumps allowed while airborne; `None` means unlimited.
    pub max_jumps: Option<u32>,
    /// The jump key must be released before jumping again.
    pub require_jump_release: bool,
    /// Share of horizontal speed the player controls while airborne, 0 to 1.
    pub air_control: f32,

    pub num_jumps: u32,
    pub in_air: bool,
    pub jump_direction: JumpDirection,
    /// Direction kept after walking off a ledge.
    pub fall_direction: Option<Facing>,
    /// Simulated time of the last jump, in seconds.
    pub last_jump_time: f32,
    pub jump_key_held: bool,
    /// Horizontal movement during the last grounded step.
    pub last_moved: Option<Facing>,
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(646.0)
    }
}

impl Gravity {
    pub fn new(jump_velocity: f32) -> Self {
        Self {
            enabled: true,
            jump_velocity,
            jump_delay: 0.25,
            max_jumps: Some(0),
            require_jump_release: true,
            air_control: 0.5,
            num_jumps: 0,
            in_air: false,
            jump_direction: JumpDirection::default(),
            fall_direction: None,
            last_jump_time: f32::NEG_INFINITY,
            jump_key_held: false,
            last_moved: None,
        }
    }

    pub fn with_max_jumps(mut self, max_jumps: Option<u32>) -> Self {
        self.max_jumps = max_jumps;
        self
    }

    pub fn with_jump_delay(mut self, seconds: f32) -> Self {
        self.jump_delay = seconds;
        self
    }

    pub fn with_air_control(mut self, air_control: f32) -> Self {
        self.air_control = air_control.clamp(0.0, 1.0);
        self
    }

    pub fn with_jump_release(mut self, required: bool) -> Self {
        self.require_jump_release = required;
        self
    }

    pub fn state(&self) -> AirState {
        if !self.in_air {
            AirState::Grounded
        } else if self.num_jumps > 0 {
            AirState::Jumping
        } else {
            AirState::Falling
        }
    }

    /// Airborne with a known fall direction.
    pub fn is_air_controlled(&self) -> bool {
        self.in_air && self.fall_direction.is_some()
    }

    /// Sign of the horizontal momentum carried through the air.
    pub fn momentum(&self) -> f32 {
        let jump = self.jump_direction.sign();
        if jump != 0.0 {
            jump
        } else {
            self.fall_direction.map(Facing::sign).unwrap_or(0.0)
        }
    }

    pub fn can_jump(&self, now: f32) -> bool {
        let has_jumps = !self.in_air
            || match self.max_jumps {
                None => true,
                Some(max) => self.num_jumps < max,
            };
        let rested = now - self.last_jump_time >= self.jump_delay;
        let released = !self.require_jump_release || !self.jump_key_held;
        self.enabled && has_jumps && rested && released
    }

    /// Launch upward. Call only after [`Gravity::can_jump`].
    pub fn jump(&mut self, kinematics: &mut Kinematics, now: f32, left: bool, right: bool) {
        kinematics.y_velocity = -self.jump_velocity;
        kinematics.y_acceleration = 0.0;
        self.num_jumps += 1;
        self.in_air = true;
        self.last_jump_time = now;
        self.jump_key_held = true;
        self.jump_direction = JumpDirection { left, right };
        self.fall_direction = None;
        debug!("Jump #{} at t={:.3}", self.num_jumps, now);
    }

    /// Leave the ground without jumping, keeping the last grounded direction.
    pub fn start_falling(&mut self) {
        if self.in_air {
            return;
        }
        self.in_air = true;
        self.fall_direction = self.last_moved;
        debug!("Started falling towards {:?}", self.fall_direction);
    }

    /// Touch down: clears jumps and any downward motion.
    pub fn land(&mut self, kinematics: &mut Kinematics) {
        if kinematics.y_velocity > 0.0 {
            kinematics.y_velocity = 0.0;
        }
        if kinematics.y_acceleration > 0.0 {
            kinematics.y_acceleration = 0.0;
        }
        if self.in_air {
            debug!("Landed after {} jump(s)", self.num_jumps);
        }
        self.in_air = false;
        self.num_jumps = 0;
        self.jump_direction = JumpDirection::default();
        self.fall_direction = None;
    }
}
