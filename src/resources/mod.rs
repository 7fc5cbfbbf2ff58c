//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: configuration, timing, input,
//! loaded sheets and the drawing interface.
//!
//! Overview
//! - `gameconfig` – INI-backed engine settings
//! - `input` – logical direction tokens and pointer state written by the host
//! - `mainloop` – host frame to physics sub-step planning, real-time clock
//! - `renderer` – drawing interface implemented by the host
//! - `sheetstore` – loaded sprite sheets and cached flipped copies
//! - `tuning` – physics and resolver constants
//! - `worldsize` – playfield dimensions
//! - `worldtime` – simulation time and delta
pub mod gameconfig;
pub mod input;
pub mod mainloop;
pub mod renderer;
pub mod sheetstore;
pub mod tuning;
pub mod worldsize;
pub mod worldtime;
