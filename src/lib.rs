//! Replaces the textures and colour variations of a host's prefabs with versions from resource
//! packs, and puts the originals back on demand.
//!
//! The host supplies its prefabs through the traits in [`host`] and its packs through [`Pack`].
//! A [`Session`] ties a [`Replacer`] to the host's loading sequence. The replacer caches every
//! texture it finds in a pack and records every original it replaces, so the host never has to
//! supply the originals again in order to restore them.

pub mod cache;
pub mod colour;
pub mod host;
pub mod ledger;
pub mod lifecycle;
pub mod logging;
pub mod names;
pub mod pack;
pub mod replacer;
pub mod settings;
pub mod texture;

#[cfg(test)]
mod testing;

pub use colour::{ColourBundle, Rgba};
pub use host::{Material, Prefab, PrefabCollection};
pub use lifecycle::{DependencyCheck, Session};
pub use names::{Detail, TextureSlot};
pub use pack::{MemoryPack, Pack, PackTexture};
pub use replacer::{Replacer, State};
pub use settings::Options;
pub use texture::{Origin, SlotTexture, Texture};
