//! Axis-aligned box geometry.
//!
//! [`Bounds`] is the base shape of every drawn object in the world: a
//! top-left corner, a size and a rotation. Rotation is only a rendering hint;
//! all overlap tests are axis-aligned.

use bevy_ecs::prelude::Component;

/// Axis-aligned rectangle with a rotation used when drawing.
///
/// `width` and `height` are expected to be positive.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Left edge in world units.
    pub x: f32,
    /// Top edge in world units.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rotation in radians, applied around the box center when drawn.
    pub rotation: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0, "box size must be positive");
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Create a box of the given size centered in a world of `world_width` x `world_height`.
    pub fn centered(width: f32, height: f32, world_width: f32, world_height: f32) -> Self {
        Self::new(
            (world_width - width) / 2.0,
            (world_height - height) / 2.0,
            width,
            height,
        )
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Strict interval intersection on the X axis. Touching edges do not overlap.
    pub fn overlaps_x(&self, other: &Bounds) -> bool {
        self.x < other.right() && self.right() > other.x
    }

    /// Strict interval intersection on the Y axis. Touching edges do not overlap.
    pub fn overlaps_y(&self, other: &Bounds) -> bool {
        self.y < other.bottom() && self.bottom() > other.y
    }

    /// AABB overlap test: both axis projections must intersect strictly.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Penetration depth on each axis, `(x, y)`. Only meaningful when overlapping.
    pub fn penetration(&self, other: &Bounds) -> (f32, f32) {
        let x = (self.right() - other.x).min(other.right() - self.x);
        let y = (self.bottom() - other.y).min(other.bottom() - self.y);
        (x, y)
    }

    /// Point containment, edges inclusive.
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}
