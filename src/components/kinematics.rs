//! Kinematic state of a moving box.
//!
//! [`Kinematics`] holds velocity, acceleration and the previous position of
//! an actor. Integration uses the midpoint method: half of the acceleration
//! is applied before the position update and half after it, which keeps
//! trajectories stable when acceleration changes every step (gravity accrues
//! per step while airborne).
//!
//! Without gravity, diagonal movement is rescaled so its magnitude equals the
//! larger axial component; moving diagonally is never faster than moving
//! straight.
//!
//! Damping is a toggle between two feels:
//! - `Some(factor)`: velocity decays by `1 - factor * delta` every step (ice).
//! - `None`: horizontal velocity (and vertical, without gravity) snaps to zero
//!   at the end of every step (grippy ground).

use bevy_ecs::prelude::Component;

use crate::components::bounds::Bounds;

/// Horizontal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// Direction of a signed horizontal quantity; `None` for zero.
    pub fn of(value: f32) -> Option<Facing> {
        if value < 0.0 {
            Some(Facing::Left)
        } else if value > 0.0 {
            Some(Facing::Right)
        } else {
            None
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Velocity in world units per second.
    pub x_velocity: f32,
    pub y_velocity: f32,
    /// Acceleration in world units per second squared.
    pub x_acceleration: f32,
    pub y_acceleration: f32,
    /// Position at the start of the current step.
    pub last_x: f32,
    pub last_y: f32,
    /// Exponential decay factor per second; `None` snaps velocity to zero each step.
    pub damping: Option<f32>,
    /// Clamp the box inside the world bounds after every move.
    pub stay_in_world: bool,
    /// Speed applied by directional input, in world units per second.
    pub move_speed: f32,
    /// Last horizontal direction the actor looked in.
    pub facing: Option<Facing>,
    /// Horizontal motion during the current step, before damping.
    pub moving: Option<Facing>,
}

impl Default for Kinematics {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Kinematics {
    pub fn new(move_speed: f32) -> Self {
        Self {
            x_velocity: 0.0,
            y_velocity: 0.0,
            x_acceleration: 0.0,
            y_acceleration: 0.0,
            last_x: 0.0,
            last_y: 0.0,
            damping: None,
            stay_in_world: true,
            move_speed,
            facing: None,
            moving: None,
        }
    }

    pub fn with_damping(mut self, damping: Option<f32>) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_velocity(mut self, x_velocity: f32, y_velocity: f32) -> Self {
        self.x_velocity = x_velocity;
        self.y_velocity = y_velocity;
        self
    }

    pub fn with_acceleration(mut self, x_acceleration: f32, y_acceleration: f32) -> Self {
        self.x_acceleration = x_acceleration;
        self.y_acceleration = y_acceleration;
        self
    }

    pub fn free_roaming(mut self) -> Self {
        self.stay_in_world = false;
        self
    }

    /// Remember where the box was before this step.
    pub fn record_position(&mut self, bounds: &Bounds) {
        self.last_x = bounds.x;
        self.last_y = bounds.y;
    }

    pub fn speed(&self) -> f32 {
        self.x_velocity.hypot(self.y_velocity)
    }

    fn apply_half_acceleration(&mut self, half_delta: f32) {
        self.x_velocity += self.x_acceleration * half_delta;
        self.y_velocity += self.y_acceleration * half_delta;
    }

    /// Midpoint integration of one step. Does not clamp to the world.
    pub fn integrate(&mut self, bounds: &mut Bounds, delta: f32, gravity_enabled: bool) {
        let half = delta / 2.0;
        self.apply_half_acceleration(half);

        if !gravity_enabled && self.x_velocity != 0.0 && self.y_velocity != 0.0 {
            let magnitude = self.x_velocity.abs().max(self.y_velocity.abs());
            let ratio = magnitude / self.speed();
            self.x_velocity *= ratio;
            self.y_velocity *= ratio;
        }

        bounds.x += self.x_velocity * delta;
        bounds.y += self.y_velocity * delta;

        self.apply_half_acceleration(half);
    }

    /// End-of-step damping. Vertical velocity is left to gravity when it is enabled.
    pub fn damp(&mut self, delta: f32, gravity_enabled: bool) {
        match self.damping {
            Some(factor) => {
                let keep = (1.0 - factor * delta).max(0.0);
                self.x_velocity *= keep;
                if !gravity_enabled {
                    self.y_velocity *= keep;
                }
            }
            None => {
                self.x_velocity = 0.0;
                if !gravity_enabled {
                    self.y_velocity = 0.0;
                }
            }
        }
    }
}
