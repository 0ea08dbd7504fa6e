//! Records what prefabs looked like before anything was replaced, so that every change can be
//! undone without the host supplying the originals again.
//!
//! Both ledgers keep the first value recorded for a key. Later recordings for the same key are
//! ignored no matter how many times the prefab is changed afterwards.

use std::collections::HashMap;

use itertools::Itertools;

use crate::{colour::ColourBundle, names, texture::SlotTexture};

/// What to do to a slot in order to restore it.
#[derive(Clone, Debug, PartialEq)]
pub enum Restoration<T> {
    /// Put this texture back in the slot.
    Texture(SlotTexture<T>),

    /// The slot was empty to begin with, so empty it again.
    Empty,
}

/// The textures that were in material slots before they were replaced, keyed by logical name.
pub struct TextureLedger<T> {
    /// `None` means that the slot was originally empty.
    originals: HashMap<String, Option<T>>,
}

impl<T> Default for TextureLedger<T> {
    fn default() -> Self {
        TextureLedger {
            originals: HashMap::new(),
        }
    }
}

impl<T: Clone> TextureLedger<T> {
    pub fn new() -> TextureLedger<T> {
        TextureLedger::default()
    }

    /// Records `current` as the original texture for `name` if nothing has been recorded for it
    /// yet. Substitutes are never recorded. Returns `true` if `current` was recorded.
    pub fn record_if_absent(&mut self, name: &str, current: Option<&SlotTexture<T>>) -> bool {
        if !names::is_original(current) {
            return false;
        }

        if self.originals.contains_key(name) {
            return false;
        }

        self.originals
            .insert(name.to_string(), current.map(|c| c.texture().clone()));

        true
    }

    /// Works out how to restore a slot whose texture has the logical name `name` and which
    /// currently holds `current`.
    ///
    /// Returns `None` if there is nothing to do: either the slot already holds an original, or no
    /// original was ever recorded for `name`.
    pub fn restore(&self, name: &str, current: Option<&SlotTexture<T>>) -> Option<Restoration<T>> {
        if names::is_original(current) {
            return None;
        }

        let original = self.originals.get(name)?;

        Some(match original {
            Some(texture) => Restoration::Texture(SlotTexture::original(texture.clone())),
            None => Restoration::Empty,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.originals.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Forgets every recorded texture. The textures themselves belong to the host, so none of
    /// them are released.
    pub fn clear(&mut self) {
        self.originals.clear();
    }
}

/// The colour bundles prefabs had before any were changed, keyed by prefab name.
#[derive(Default)]
pub struct ColourLedger {
    originals: HashMap<String, ColourBundle>,
}

impl ColourLedger {
    pub fn new() -> ColourLedger {
        ColourLedger::default()
    }

    /// Records `bundle` for `object` unless a bundle has already been recorded for it. Returns
    /// `true` if `bundle` was recorded.
    pub fn record_if_absent(&mut self, object: &str, bundle: ColourBundle) -> bool {
        if self.originals.contains_key(object) {
            return false;
        }

        self.originals.insert(object.to_string(), bundle);
        true
    }

    pub fn get(&self, object: &str) -> Option<ColourBundle> {
        self.originals.get(object).copied()
    }

    /// Returns the names of every object with a recorded bundle, sorted.
    pub fn objects(&self) -> Vec<String> {
        self.originals.keys().sorted().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }
}
