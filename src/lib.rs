//! Canvas Engine library.
//!
//! A small 2D engine for box-shaped actors: sprite-sheet animation, midpoint
//! integration, gravity and jumping, and axis-aligned collision against
//! solids. The host owns the clock, the input devices and the pixels; the
//! engine is driven through [`game::Game::frame`] and draws through a
//! [`resources::renderer::Renderer`].

pub mod components;
pub mod error;
pub mod events;
pub mod game;
pub mod resources;
pub mod systems;
