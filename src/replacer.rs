//! Applies replacements to the host's prefabs and takes them away again.
//!
//! The replacer owns the pack registry, the substitution cache and both ledgers. Nothing else
//! writes to them. Replacing a texture goes through the cache and records the original in the
//! texture ledger first; restoring only ever reads the ledger.

use crate::{
    cache::SubstitutionCache,
    colour::ColourBundle,
    host::{Material, Prefab, PrefabCollection},
    ledger::{ColourLedger, Restoration, TextureLedger},
    names::{self, Detail, TextureSlot},
    pack::{Pack, PackRegistry},
    texture::{SlotTexture, Texture},
};

/// Whether textures are currently being replaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Nothing is cached and no textures have been replaced since the last clear.
    Idle,

    /// Textures have been replaced and the cache may hold replacements.
    Active,
}

/// The replacement engine. One is created per session and dropped when the session ends.
pub struct Replacer<T: Texture> {
    packs: PackRegistry<T>,
    cache: SubstitutionCache<T>,
    textures: TextureLedger<T>,
    colours: ColourLedger,
    state: State,
}

impl<T: Texture> Default for Replacer<T> {
    fn default() -> Self {
        Replacer {
            packs: PackRegistry::new(),
            cache: SubstitutionCache::new(),
            textures: TextureLedger::new(),
            colours: ColourLedger::new(),
            state: State::Idle,
        }
    }
}

impl<T: Texture> Replacer<T> {
    pub fn new() -> Replacer<T> {
        Replacer::default()
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn packs(&self) -> &PackRegistry<T> {
        &self.packs
    }

    /// Activates `pack` at a lower priority than every pack already active. Returns `false` if a
    /// pack with the same identity is already active.
    pub fn activate_pack(&mut self, pack: impl Pack<T> + 'static) -> bool {
        self.packs.activate(Box::new(pack))
    }

    /// Deactivates the pack with the given identity. Anything cached from the pack is dropped so
    /// it can't be handed out again. Slots may still show the pack's textures, so the ones the
    /// cache owns are kept alive until the cache is cleared. Returns `false` if no such pack was
    /// active.
    pub fn deactivate_pack(&mut self, identity: &str) -> bool {
        if self.packs.deactivate(identity).is_none() {
            return false;
        }

        let retired = self.cache.evict_pack(identity);
        log::debug!("Deactivated '{}' ({} texture(s) held until clear)", identity, retired);

        true
    }

    /// Returns the identities of the active packs, highest priority first.
    pub fn active_packs(&self) -> Vec<&str> {
        self.packs.identities()
    }

    /// Finds the replacement for `slot` in `object`'s `detail` model.
    pub fn resolve(
        &mut self,
        object: &str,
        slot: TextureSlot,
        detail: Detail,
    ) -> Option<SlotTexture<T>> {
        let name = names::texture_name(object, slot, detail);
        self.cache.resolve(&self.packs, &name)
    }

    /// Replaces the textures of every loaded prefab. Returns the number of slots changed.
    pub fn replace_all_textures<C>(&mut self, prefabs: &mut C) -> usize
    where
        C: PrefabCollection<T>,
    {
        log::info!("Replacing textures using {}", self.packs.describe());

        if !self.packs.is_empty() {
            self.state = State::Active;
        }

        let mut replaced = 0;

        for index in 0..prefabs.loaded_count() {
            match prefabs.loaded_mut(index) {
                Some(prefab) => replaced += self.replace_textures(prefab),
                None => log::trace!("No prefab loaded at index {}", index),
            }
        }

        log::info!("Replaced {} texture(s)", replaced);
        replaced
    }

    /// Replaces the textures of both models of `prefab`. Returns the number of slots changed.
    pub fn replace_textures(&mut self, prefab: &mut impl Prefab<T>) -> usize {
        let name = prefab.name().to_string();
        let mut replaced = 0;

        for detail in [Detail::Full, Detail::Lod] {
            if let Some(material) = prefab.material_mut(detail) {
                replaced += self.replace_material(material, &name, detail);
            } else if detail == Detail::Full {
                log::trace!("'{}' has no material", name);
            }
        }

        if replaced > 0 {
            self.state = State::Active;
        }

        replaced
    }

    fn replace_material(
        &mut self,
        material: &mut impl Material<T>,
        object: &str,
        detail: Detail,
    ) -> usize {
        let mut replaced = 0;

        for slot in TextureSlot::all() {
            let name = names::texture_name(object, slot, detail);

            let replacement = match self.cache.resolve(&self.packs, &name) {
                Some(replacement) => replacement,
                None => continue,
            };

            let current = material.texture(slot);

            // Substitutes are refused by the ledger, so replacing twice keeps the real original.
            self.textures.record_if_absent(&name, current.as_ref());

            log::debug!("Replacing texture {}", name);

            material.set_texture(slot, Some(replacement));
            replaced += 1;
        }

        replaced
    }

    /// Puts back the original textures of every loaded prefab. Returns the number of slots
    /// changed.
    pub fn restore_all_textures<C>(&self, prefabs: &mut C) -> usize
    where
        C: PrefabCollection<T>,
    {
        let mut restored = 0;

        for index in 0..prefabs.loaded_count() {
            if let Some(prefab) = prefabs.loaded_mut(index) {
                restored += self.restore_textures(prefab);
            }
        }

        log::info!("Restored {} texture(s)", restored);
        restored
    }

    /// Puts back the original textures of both models of `prefab`. Slots that hold originals, and
    /// slots whose originals were never recorded, are left alone. Returns the number of slots
    /// changed.
    pub fn restore_textures(&self, prefab: &mut impl Prefab<T>) -> usize {
        let name = prefab.name().to_string();

        [Detail::Full, Detail::Lod]
            .into_iter()
            .filter_map(|detail| {
                let material = prefab.material_mut(detail)?;
                Some(self.restore_material(material, &name, detail))
            })
            .sum()
    }

    fn restore_material(
        &self,
        material: &mut impl Material<T>,
        object: &str,
        detail: Detail,
    ) -> usize {
        let mut restored = 0;

        for slot in TextureSlot::all() {
            let name = names::texture_name(object, slot, detail);
            let current = material.texture(slot);

            let original = match self.textures.restore(&name, current.as_ref()) {
                Some(Restoration::Texture(original)) => Some(original),
                Some(Restoration::Empty) => None,
                None => continue,
            };

            log::debug!("Restoring original texture for {}", name);

            material.set_texture(slot, original);
            restored += 1;
        }

        restored
    }

    /// Changes the colour variations of `prefab` to `colours`, recording the prefab's current
    /// colours first if they haven't been recorded already.
    pub fn set_colours(&mut self, prefab: &mut impl Prefab<T>, colours: ColourBundle) {
        if self.colours.record_if_absent(prefab.name(), prefab.colours()) {
            log::trace!("Recorded original colours for '{}'", prefab.name());
        }

        prefab.set_colours(colours);
    }

    /// Applies the colours that the highest-priority pack has for `prefab`. Returns `false` if no
    /// active pack has any.
    pub fn apply_pack_colours(&mut self, prefab: &mut impl Prefab<T>) -> bool {
        let colours = match self.packs.colours(prefab.name()) {
            Some((pack, colours)) => {
                log::debug!("Using colours from '{}' for '{}'", pack, prefab.name());
                colours
            }

            None => return false,
        };

        self.set_colours(prefab, colours);
        true
    }

    /// Restores the recorded colours of every prefab whose colours were changed. Returns the number
    /// of prefabs restored.
    pub fn restore_all_colours<C>(&self, prefabs: &mut C) -> usize
    where
        C: PrefabCollection<T>,
    {
        let mut restored = 0;

        for object in self.colours.objects() {
            match prefabs.find_loaded_mut(&object) {
                Some(prefab) => {
                    if self.restore_colours(prefab) {
                        restored += 1;
                    }
                }

                None => log::debug!("'{}' is no longer loaded", object),
            }
        }

        restored
    }

    /// Restores the recorded colours of `prefab`. Returns `false` if none were recorded.
    pub fn restore_colours(&self, prefab: &mut impl Prefab<T>) -> bool {
        match self.colours.get(prefab.name()) {
            Some(original) => {
                prefab.set_colours(original);
                true
            }

            None => false,
        }
    }

    /// Forgets every recorded original texture and empties the cache, releasing the replacement
    /// textures it owns. Recorded colours are kept. Returns the number of textures released.
    pub fn clear_cache(&mut self) -> usize {
        log::debug!("Clearing texture cache...");

        self.textures.clear();
        let released = self.cache.clear();

        self.state = State::Idle;
        released
    }

    /// Like `clear_cache`, but replacements still assigned to any loaded prefab are not released.
    /// They stay in place and the host becomes responsible for them. Returns the number of
    /// textures released.
    pub fn clear_cache_keeping_assigned<C>(&mut self, prefabs: &mut C) -> usize
    where
        C: PrefabCollection<T>,
    {
        let assigned = assigned_substitutes(prefabs);
        log::debug!("Clearing texture cache, keeping {} assigned texture(s)...", assigned.len());

        self.textures.clear();
        let released = self.cache.clear_except(&assigned);

        self.state = State::Idle;
        released
    }
}

/// Collects the substitutes currently sitting in the slots of every loaded prefab.
fn assigned_substitutes<T, C>(prefabs: &mut C) -> Vec<T>
where
    T: Texture,
    C: PrefabCollection<T>,
{
    let mut assigned = Vec::new();

    for index in 0..prefabs.loaded_count() {
        let prefab = match prefabs.loaded_mut(index) {
            Some(prefab) => prefab,
            None => continue,
        };

        for detail in [Detail::Full, Detail::Lod] {
            if let Some(material) = prefab.material_mut(detail) {
                assigned.extend(
                    TextureSlot::all()
                        .filter_map(|slot| material.texture(slot))
                        .filter(|texture| !texture.is_original())
                        .map(SlotTexture::into_texture),
                );
            }
        }
    }

    assigned
}
