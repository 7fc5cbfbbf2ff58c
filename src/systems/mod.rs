//! Engine systems.
//!
//! Submodules overview
//! - [`animation`] – bind loaded sheets and feed real time to sprite loops
//! - [`collision`] – push actors out of solids, landings and ledges
//! - [`input`] – copy input state into player intents, pointer dragging
//! - [`movement`] – integrate actors for one physics sub-step
//! - [`render`] – draw the world through the host renderer
//! - [`time`] – advance simulated time

pub mod animation;
pub mod collision;
pub mod input;
pub mod movement;
pub mod render;
pub mod time;
