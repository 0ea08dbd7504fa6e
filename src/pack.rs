//! Resource packs and the ordered registry of active packs.
//!
//! Packs are loaded by the host. The replacer only keeps hold of a pack while it is active and
//! never decides the order itself: packs are searched in the order they were activated, and the
//! first pack with a match wins.

use itertools::Itertools;

use crate::colour::ColourBundle;

mod memory;

pub use memory::{load_colour_table, MemoryPack};

/// A texture returned from a pack lookup.
#[derive(Debug)]
pub enum PackTexture<T> {
    /// A texture created for this lookup. The receiver owns it and must release it.
    Owned(T),

    /// A texture that stays in the pack's own storage. The receiver must not release it.
    Shared(T),
}

impl<T> PackTexture<T> {
    /// Returns `true` if the receiver is responsible for releasing the texture.
    pub fn is_owned(&self) -> bool {
        matches!(self, PackTexture::Owned(_))
    }

    pub fn into_texture(self) -> T {
        match self {
            PackTexture::Owned(texture) | PackTexture::Shared(texture) => texture,
        }
    }
}

/// A source of replacement resources.
pub trait Pack<T> {
    /// A stable string that identifies this pack, such as the path it was loaded from.
    fn identity(&self) -> &str;

    /// Looks up the texture with the logical name `name`.
    fn texture(&self, name: &str) -> Option<PackTexture<T>>;

    /// Returns the colour variation bundle this pack provides for `object`, if any.
    fn colours(&self, _object: &str) -> Option<ColourBundle> {
        None
    }
}

/// The active packs, highest priority first.
pub struct PackRegistry<T> {
    packs: Vec<Box<dyn Pack<T>>>,
}

impl<T> Default for PackRegistry<T> {
    fn default() -> Self {
        PackRegistry { packs: Vec::new() }
    }
}

impl<T> PackRegistry<T> {
    pub fn new() -> PackRegistry<T> {
        PackRegistry::default()
    }

    /// Adds `pack` at the lowest priority. Returns `false` (and drops the pack) if a pack with the
    /// same identity is already active.
    pub fn activate(&mut self, pack: Box<dyn Pack<T>>) -> bool {
        if self.contains(pack.identity()) {
            log::warn!("Pack '{}' is already active", pack.identity());
            return false;
        }

        log::info!(
            "Activating pack '{}' at priority {}",
            pack.identity(),
            self.packs.len()
        );

        self.packs.push(pack);
        true
    }

    /// Removes the pack with the given identity, returning it if it was active.
    pub fn deactivate(&mut self, identity: &str) -> Option<Box<dyn Pack<T>>> {
        let index = self.packs.iter().position(|p| p.identity() == identity)?;

        log::info!("Deactivating pack '{}'", identity);
        Some(self.packs.remove(index))
    }

    pub fn contains(&self, identity: &str) -> bool {
        self.packs.iter().any(|p| p.identity() == identity)
    }

    /// Returns an iterator over the active packs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Pack<T>> {
        self.packs.iter().map(|pack| &**pack as &dyn Pack<T>)
    }

    /// Returns the identities of the active packs in priority order.
    pub fn identities(&self) -> Vec<&str> {
        self.iter().map(|pack| pack.identity()).collect()
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Finds the colour bundle for `object` in the highest-priority pack that has one.
    pub fn colours(&self, object: &str) -> Option<(&str, ColourBundle)> {
        self.iter()
            .find_map(|pack| pack.colours(object).map(|bundle| (pack.identity(), bundle)))
    }

    /// Returns a printable list of the active packs.
    pub fn describe(&self) -> String {
        if self.packs.is_empty() {
            return "no packs".to_string();
        }

        self.iter()
            .map(|pack| format!("'{}'", pack.identity()))
            .join(", ")
    }
}
