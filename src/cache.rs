//! Caches the replacement textures found in the active packs.
//!
//! Each resolved texture is stored against the pack it came from and the logical name it was
//! found under. Once a pair has been resolved it is never looked up in the pack again until the
//! cache is cleared. Misses are not cached, so a texture that no pack has can still be found later
//! if a new pack is activated.

use std::collections::HashMap;

use crate::{
    pack::PackRegistry,
    texture::{SlotTexture, Texture},
};

/// Identifies a cached texture: the pack it came from and its logical name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubstitutionKey {
    pack: String,
    name: String,
}

impl SubstitutionKey {
    pub fn new(pack: impl Into<String>, name: impl Into<String>) -> SubstitutionKey {
        SubstitutionKey {
            pack: pack.into(),
            name: name.into(),
        }
    }

    pub fn pack(&self) -> &str {
        &self.pack
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

struct CachedTexture<T> {
    texture: T,

    /// Whether the cache is responsible for releasing the texture. Textures that belong to a
    /// pack's own storage are only borrowed.
    owned: bool,
}

/// Replacement textures keyed by pack and logical name.
pub struct SubstitutionCache<T: Texture> {
    entries: HashMap<SubstitutionKey, CachedTexture<T>>,

    /// Owned textures evicted with their pack. They can still be assigned to a slot, so they are
    /// only released when the cache is cleared.
    retired: Vec<T>,
}

impl<T: Texture> Default for SubstitutionCache<T> {
    fn default() -> Self {
        SubstitutionCache {
            entries: HashMap::new(),
            retired: Vec::new(),
        }
    }
}

impl<T: Texture> SubstitutionCache<T> {
    pub fn new() -> SubstitutionCache<T> {
        SubstitutionCache::default()
    }

    /// Finds the replacement for the texture named `name`.
    ///
    /// Packs are checked in priority order. For each pack, the cache is consulted first and the
    /// pack itself is only asked if the cache has nothing for it. The first hit of either kind is
    /// returned, tagged as a substitute.
    pub fn resolve(&mut self, packs: &PackRegistry<T>, name: &str) -> Option<SlotTexture<T>> {
        for pack in packs.iter() {
            let key = SubstitutionKey::new(pack.identity(), name);

            if let Some(cached) = self.entries.get(&key) {
                return Some(SlotTexture::substitute(cached.texture.clone()));
            }

            if let Some(found) = pack.texture(name) {
                log::trace!("Found '{}' in pack '{}'", name, pack.identity());

                let owned = found.is_owned();
                let texture = found.into_texture();

                self.entries.insert(
                    key,
                    CachedTexture {
                        texture: texture.clone(),
                        owned,
                    },
                );

                return Some(SlotTexture::substitute(texture));
            }
        }

        None
    }

    /// Returns `true` if there is a cached texture for `key`.
    pub fn contains(&self, key: &SubstitutionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry that came from the pack `identity`. Owned textures are set aside rather
    /// than released, because the host may still be showing them. Returns the number set aside.
    pub fn evict_pack(&mut self, identity: &str) -> usize {
        let keys: Vec<_> = self
            .entries
            .keys()
            .filter(|key| key.pack == identity)
            .cloned()
            .collect();

        let before = self.retired.len();

        for key in keys {
            if let Some(cached) = self.entries.remove(&key) {
                if cached.owned {
                    self.retired.push(cached.texture);
                }
            }
        }

        self.retired.len() - before
    }

    /// Empties the cache, releasing every texture it owns. Returns the number of textures
    /// released.
    pub fn clear(&mut self) -> usize {
        self.clear_except(&[])
    }

    /// Empties the cache, releasing every texture it owns except those in `assigned`. Ownership
    /// of the textures in `assigned` passes to whoever holds them. Returns the number of textures
    /// released.
    pub fn clear_except(&mut self, assigned: &[T]) -> usize {
        let owned = self
            .entries
            .drain()
            .filter(|(_, cached)| cached.owned)
            .map(|(_, cached)| cached.texture);

        let mut released = 0;

        for texture in self.retired.drain(..).chain(owned) {
            if !assigned.contains(&texture) {
                texture.release();
                released += 1;
            }
        }

        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingPack, TestTexture};

    fn registry(packs: Vec<CountingPack>) -> PackRegistry<TestTexture> {
        let mut registry = PackRegistry::new();

        for pack in packs {
            registry.activate(Box::new(pack));
        }

        registry
    }

    #[test]
    fn resolving_twice_queries_pack_once() {
        let pack = CountingPack::owned("p1", &["roof.png"]);
        let queries = pack.queries();
        let packs = registry(vec![pack]);

        let mut cache = SubstitutionCache::new();

        let first = cache.resolve(&packs, "roof.png").unwrap();
        let second = cache.resolve(&packs, "roof.png").unwrap();

        assert!(first.texture().same_as(second.texture()));
        assert!(!first.is_original());
        assert_eq!(queries.get(), 1);
    }

    #[test]
    fn first_pack_wins() {
        let packs = registry(vec![
            CountingPack::owned("p1", &["roof.png"]),
            CountingPack::owned("p2", &["roof.png"]),
        ]);

        let mut cache = SubstitutionCache::new();
        let found = cache.resolve(&packs, "roof.png").unwrap();

        assert_eq!(found.texture().label(), "p1/roof.png");
        assert!(cache.contains(&SubstitutionKey::new("p1", "roof.png")));
        assert!(!cache.contains(&SubstitutionKey::new("p2", "roof.png")));
    }

    #[test]
    fn later_pack_is_used_when_earlier_lacks_texture() {
        let packs = registry(vec![
            CountingPack::owned("p1", &["wall.png"]),
            CountingPack::owned("p2", &["roof.png"]),
        ]);

        let mut cache = SubstitutionCache::new();
        let found = cache.resolve(&packs, "roof.png").unwrap();

        assert_eq!(found.texture().label(), "p2/roof.png");
    }

    #[test]
    fn misses_are_not_cached() {
        let pack = CountingPack::owned("p1", &[]);
        let queries = pack.queries();
        let packs = registry(vec![pack]);

        let mut cache = SubstitutionCache::new();

        assert!(cache.resolve(&packs, "roof.png").is_none());
        assert!(cache.resolve(&packs, "roof.png").is_none());

        assert!(cache.is_empty());
        assert_eq!(queries.get(), 2);
    }

    #[test]
    fn clear_releases_owned_textures_and_requeries() {
        let pack = CountingPack::owned("p1", &["roof.png"]);
        let queries = pack.queries();
        let packs = registry(vec![pack]);

        let mut cache = SubstitutionCache::new();
        let found = cache.resolve(&packs, "roof.png").unwrap();

        assert_eq!(cache.clear(), 1);
        assert!(found.texture().is_released());

        cache.resolve(&packs, "roof.png").unwrap();
        assert_eq!(queries.get(), 2);
    }

    #[test]
    fn clear_leaves_shared_textures_alone() {
        let packs = registry(vec![CountingPack::shared("p1", &["roof.png"])]);

        let mut cache = SubstitutionCache::new();
        let found = cache.resolve(&packs, "roof.png").unwrap();

        assert_eq!(cache.clear(), 0);
        assert!(cache.is_empty());
        assert!(!found.texture().is_released());
    }

    #[test]
    fn evicting_a_pack_keeps_other_entries() {
        let packs = registry(vec![
            CountingPack::owned("p1", &["roof.png"]),
            CountingPack::owned("p2", &["wall.png"]),
        ]);

        let mut cache = SubstitutionCache::new();
        let roof = cache.resolve(&packs, "roof.png").unwrap();
        let wall = cache.resolve(&packs, "wall.png").unwrap();

        assert_eq!(cache.evict_pack("p1"), 1);
        assert!(!cache.contains(&SubstitutionKey::new("p1", "roof.png")));
        assert_eq!(cache.len(), 1);

        // Evicted textures may still be on screen until the cache is cleared.
        assert!(!roof.texture().is_released());

        assert_eq!(cache.clear(), 2);
        assert!(roof.texture().is_released());
        assert!(wall.texture().is_released());
    }

    #[test]
    fn clearing_keeps_assigned_textures_alive() {
        let packs = registry(vec![
            CountingPack::owned("p1", &["roof.png", "wall.png"]),
            CountingPack::owned("p2", &["door.png"]),
        ]);

        let mut cache = SubstitutionCache::new();
        let roof = cache.resolve(&packs, "roof.png").unwrap();
        let wall = cache.resolve(&packs, "wall.png").unwrap();
        let door = cache.resolve(&packs, "door.png").unwrap();

        cache.evict_pack("p2");

        let assigned = [roof.texture().clone(), door.texture().clone()];
        assert_eq!(cache.clear_except(&assigned), 1);

        assert!(cache.is_empty());
        assert!(!roof.texture().is_released());
        assert!(!door.texture().is_released());
        assert!(wall.texture().is_released());
    }
}
