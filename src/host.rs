//! The capabilities the replacer needs from the host's prefab system.
//!
//! Host adapters implement these traits over whatever the host uses to represent prefabs. Every
//! texture an adapter hands over must have been wrapped with `SlotTexture::original` when the host
//! assigned it, and every texture the replacer sets must be kept with its tag intact.

use crate::{
    colour::ColourBundle,
    names::{Detail, TextureSlot},
    texture::SlotTexture,
};

/// A material with a fixed set of texture slots.
pub trait Material<T> {
    /// Returns the texture currently in `slot`, or `None` if the slot is empty.
    fn texture(&self, slot: TextureSlot) -> Option<SlotTexture<T>>;

    /// Puts `texture` in `slot`. `None` empties the slot.
    fn set_texture(&mut self, slot: TextureSlot, texture: Option<SlotTexture<T>>);
}

/// A loaded prefab.
pub trait Prefab<T> {
    type Material: Material<T>;

    /// The prefab's unique name.
    fn name(&self) -> &str;

    /// Returns the material used by the given representation of the prefab.
    ///
    /// This is `None` if the prefab has no such representation (most commonly, no LOD model), or
    /// if the representation has no renderer or material.
    fn material_mut(&mut self, detail: Detail) -> Option<&mut Self::Material>;

    fn colours(&self) -> ColourBundle;

    fn set_colours(&mut self, colours: ColourBundle);
}

/// The host's set of loaded prefabs.
pub trait PrefabCollection<T> {
    type Prefab: Prefab<T>;

    /// The number of loaded prefabs. Valid indices are `0..loaded_count()`.
    fn loaded_count(&self) -> usize;

    /// Returns the prefab at `index`. Indices may refer to prefabs that are no longer loaded, in
    /// which case this returns `None`.
    fn loaded_mut(&mut self, index: usize) -> Option<&mut Self::Prefab>;

    fn find_loaded_mut(&mut self, name: &str) -> Option<&mut Self::Prefab>;
}
