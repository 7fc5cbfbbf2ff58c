//! Drawing interface implemented by the host.
//!
//! The engine never touches pixels. Everything it draws goes through a
//! [`Renderer`], which may be a canvas, a GPU backend or a recorder in tests.

use crate::components::sprite::{Flip, SourceRect};

/// Opaque handle to an image owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRef(pub u64);

/// Destination rectangle in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Draw primitives the engine needs from the host.
pub trait Renderer {
    /// Fill `dest` with a solid color (any CSS-like color string the host understands).
    fn fill_rect(&mut self, color: &str, dest: DrawRect, rotation: f32);

    /// Copy `src` from `image` into `dest`.
    fn draw_image(&mut self, image: ImageRef, src: SourceRect, dest: DrawRect, rotation: f32);

    /// Produce a mirrored copy of `image`. Called at most once per image and flip.
    fn flip_image(&mut self, image: ImageRef, flip: Flip) -> ImageRef;
}
