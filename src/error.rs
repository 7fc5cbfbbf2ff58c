//! Error type for fallible setup operations.
//!
//! Only setup (loading, saving, building sprite maps) goes through
//! [`EngineError`]. The per-frame paths
//! (physics, collision, animation, drawing) never fail; missing collaborators
//! there degrade to no-ops with a warning.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load config file {path:?}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("failed to save config file {path:?}: {reason}")]
    ConfigSave { path: PathBuf, reason: String },

    #[error("invalid value for [{section}] {key}: {reason}")]
    ConfigValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },

    #[error("invalid frame interval for {owner}: {interval_ms} ms, must be positive")]
    FrameInterval { owner: String, interval_ms: f64 },

    #[error("invalid animation sequences: {0}")]
    Sequences(#[from] serde_json::Error),
}
