//! Pointer-follow mode.

use bevy_ecs::prelude::Component;

/// Lets the pointer pick up and carry an entity.
///
/// While `dragging` is set, the actor update skips integration and places the
/// box so that the grab point stays under the pointer.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Draggable {
    pub dragging: bool,
    /// Grab point relative to the box's top-left corner.
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Draggable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up the box at a pointer position.
    pub fn grab(&mut self, pointer_x: f32, pointer_y: f32, box_x: f32, box_y: f32) {
        self.dragging = true;
        self.offset_x = pointer_x - box_x;
        self.offset_y = pointer_y - box_y;
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Top-left corner that keeps the grab point under the pointer.
    pub fn target(&self, pointer_x: f32, pointer_y: f32) -> (f32, f32) {
        (pointer_x - self.offset_x, pointer_y - self.offset_y)
    }
}
