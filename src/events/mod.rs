//! Event types used by the engine.
//!
//! Events provide a decoupled way for systems to report what happened
//! without knowing who is interested. They are triggered through
//! `Commands::trigger` and picked up by observers.
//!
//! Submodules:
//! - [`animation`] – run-once sprite loops reaching their end
//! - [`collision`] – actors pushed out of solids
pub mod animation;
pub mod collision;
