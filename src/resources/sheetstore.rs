//! Loaded sprite sheets and their flipped copies.
//!
//! Image loading happens outside the engine. Once the host has an image
//! ready it registers it in the [`SheetStore`]; sprites that reference the
//! key are bound on the next animation pass. Until then they draw nothing.
//!
//! [`FlipCache`] keeps one mirrored copy per sheet and flip combination. Keys
//! are requested cheaply at any time and realized through the renderer at the
//! start of the next render pass.

use bevy_ecs::prelude::Resource;
use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::sprite::Flip;
use crate::resources::renderer::{ImageRef, Renderer};

/// A loaded image and its pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetImage {
    pub image: ImageRef,
    pub width: f32,
    pub height: f32,
}

/// Registry of loaded sheets keyed by texture key.
#[derive(Resource, Debug, Default)]
pub struct SheetStore {
    pub map: FxHashMap<String, SheetImage>,
}

impl SheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loaded image under `key`.
    pub fn insert(&mut self, key: impl Into<String>, image: ImageRef, width: f32, height: f32) {
        let key = key.into();
        debug!("Sheet '{}' loaded ({}x{})", key, width, height);
        self.map.insert(
            key,
            SheetImage {
                image,
                width,
                height,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<&SheetImage> {
        self.map.get(key)
    }

    pub fn is_loaded(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

/// Mirrored sheet copies, computed once per (texture, flip).
#[derive(Resource, Debug, Default)]
pub struct FlipCache {
    flipped: FxHashMap<(String, Flip), ImageRef>,
    pending: FxHashSet<(String, Flip)>,
}

impl FlipCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a flipped copy of `key`. Idempotent; unflipped requests are ignored.
    pub fn request(&mut self, key: &str, flip: Flip) {
        if flip.is_none() {
            return;
        }
        let entry = (key.to_string(), flip);
        if !self.flipped.contains_key(&entry) {
            self.pending.insert(entry);
        }
    }

    pub fn get(&self, key: &str, flip: Flip) -> Option<ImageRef> {
        self.flipped.get(&(key.to_string(), flip)).copied()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Produce every pending copy whose sheet is loaded. Returns how many were made.
    ///
    /// Requests for sheets that are still loading stay pending.
    pub fn resolve(&mut self, renderer: &mut dyn Renderer, sheets: &SheetStore) -> usize {
        let mut made = 0;
        let pending: Vec<(String, Flip)> = self.pending.iter().cloned().collect();
        for entry in pending {
            let Some(sheet) = sheets.get(&entry.0) else {
                continue;
            };
            let image = renderer.flip_image(sheet.image, entry.1);
            debug!("Cached flip {:?} of sheet '{}'", entry.1, entry.0);
            self.pending.remove(&entry);
            self.flipped.insert(entry, image);
            made += 1;
        }
        made
    }

    pub fn clear(&mut self) {
        self.flipped.clear();
        self.pending.clear();
    }
}
