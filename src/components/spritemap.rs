//! Named animation sequences over a single sprite sheet.
//!
//! A [`SpriteMap`] owns one [`Sprite`] and a table of [`AnimationSequence`]s
//! keyed by name ("stand", "left", "jumpRight", ...). Switching sequences
//! re-targets the sprite's frame range and flip and restarts its loop.
//!
//! Sequences can be declared in code with [`SpriteMap::set`] or loaded from a
//! JSON document:
//!
//! ```json
//! {
//!   "stand": { "start_row": 0, "start_col": 0, "end_row": 0, "end_col": 0 },
//!   "right": { "start_row": 0, "start_col": 1, "end_row": 0, "end_col": 4 },
//!   "left":  { "start_row": 0, "start_col": 1, "end_row": 0, "end_col": 4,
//!              "flip": { "horizontal": true } }
//! }
//! ```

use log::{debug, warn};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::sprite::{AdvanceMode, Flip, FrameRange, LoopHandle, Sprite};
use crate::error::EngineError;

/// One named range of frames plus how to present it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationSequence {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
    #[serde(default)]
    pub squeeze: bool,
    #[serde(default)]
    pub flip: Flip,
    /// Overrides the map's frame interval for this sequence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_ms: Option<f64>,
}

impl AnimationSequence {
    pub fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
            squeeze: false,
            flip: Flip::NONE,
            interval_ms: None,
        }
    }

    pub fn squeezed(mut self) -> Self {
        self.squeeze = true;
        self
    }

    pub fn flipped(mut self, flip: Flip) -> Self {
        self.flip = flip;
        self
    }

    /// Fails unless `interval_ms` is positive and finite.
    pub fn with_interval(mut self, interval_ms: f64) -> Result<Self, EngineError> {
        self.interval_ms = Some(check_interval("sequence", interval_ms)?);
        Ok(self)
    }

    pub fn range(&self) -> FrameRange {
        FrameRange {
            start_row: self.start_row,
            start_col: self.start_col,
            end_row: self.end_row,
            end_col: self.end_col,
            squeeze: self.squeeze,
        }
    }
}

fn check_interval(owner: impl std::fmt::Display, interval_ms: f64) -> Result<f64, EngineError> {
    if interval_ms.is_finite() && interval_ms > 0.0 {
        Ok(interval_ms)
    } else {
        Err(EngineError::FrameInterval {
            owner: owner.to_string(),
            interval_ms,
        })
    }
}

/// Animation selector: a sprite plus its named sequences.
#[derive(Debug)]
pub struct SpriteMap {
    pub sprite: Sprite,
    /// Default frame interval for sequences that do not set their own.
    pub interval_ms: f64,
    pub mode: AdvanceMode,
    sequences: FxHashMap<String, AnimationSequence>,
    active: Option<String>,
    handle: Option<LoopHandle>,
}

impl SpriteMap {
    /// Fails unless `interval_ms` is positive and finite.
    pub fn new(sprite: Sprite, interval_ms: f64, mode: AdvanceMode) -> Result<Self, EngineError> {
        let interval_ms = check_interval(format_args!("sprite '{}'", sprite.tex_key), interval_ms)?;
        Ok(Self {
            sprite,
            interval_ms,
            mode,
            sequences: FxHashMap::default(),
            active: None,
            handle: None,
        })
    }

    /// Builder form of [`SpriteMap::set`].
    pub fn with_sequence(mut self, name: impl Into<String>, sequence: AnimationSequence) -> Self {
        self.set(name, sequence);
        self
    }

    /// Register or overwrite a sequence.
    ///
    /// Overwriting the active sequence re-applies it from frame 1.
    pub fn set(&mut self, name: impl Into<String>, sequence: AnimationSequence) {
        let name = name.into();
        let reapply = self.active.as_deref() == Some(name.as_str());
        self.sequences.insert(name.clone(), sequence);
        if reapply {
            self.use_animation(&name, true);
        }
    }

    /// Parse a JSON object of sequences and register all of them.
    ///
    /// Nothing is registered if any sequence is malformed.
    pub fn load_json(&mut self, json: &str) -> Result<usize, EngineError> {
        let parsed: FxHashMap<String, AnimationSequence> = serde_json::from_str(json)?;
        for (name, sequence) in &parsed {
            if let Some(interval_ms) = sequence.interval_ms {
                check_interval(format_args!("sequence '{name}'"), interval_ms)?;
            }
        }
        let count = parsed.len();
        for (name, sequence) in parsed {
            self.set(name, sequence);
        }
        debug!(
            "Loaded {} animation sequences for '{}'",
            count, self.sprite.tex_key
        );
        Ok(count)
    }

    pub fn get(&self, name: &str) -> Option<&AnimationSequence> {
        self.sequences.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    pub fn sequences(&self) -> impl Iterator<Item = (&String, &AnimationSequence)> {
        self.sequences.iter()
    }

    /// Name of the running sequence.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Switch the sprite to a named sequence.
    ///
    /// Does nothing if it is already active, unless `restart_if_in_use`.
    /// Returns false if no sequence has that name.
    pub fn use_animation(&mut self, name: &str, restart_if_in_use: bool) -> bool {
        let Some(sequence) = self.sequences.get(name).copied() else {
            warn!(
                "Animation '{}' is not defined for sprite '{}'",
                name, self.sprite.tex_key
            );
            return false;
        };
        if self.active.as_deref() == Some(name) && !restart_if_in_use {
            return true;
        }
        if let Some(handle) = self.handle.take() {
            self.sprite.stop_loop(handle);
        }
        self.sprite.set_range(sequence.range());
        self.sprite.flip = sequence.flip;
        let interval = sequence.interval_ms.unwrap_or(self.interval_ms);
        self.handle = Some(self.sprite.start_loop(interval, self.mode, false));
        self.active = Some(name.to_string());
        true
    }

    /// Use the first registered name among `candidates`.
    ///
    /// Returns false, leaving the current frame untouched, if none is registered.
    pub fn use_first(&mut self, candidates: &[&str]) -> bool {
        match candidates.iter().find(|c| self.sequences.contains_key(**c)) {
            Some(name) => self.use_animation(name, false),
            None => false,
        }
    }

    /// Stop the running sequence; the sprite rewinds to frame 1.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.sprite.stop_loop(handle);
        }
        self.active = None;
    }
}
