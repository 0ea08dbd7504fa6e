//! Texture handles and the tag that tells substitutes apart from the textures the host started
//! with.

use std::fmt::Debug;

/// A host texture handle.
///
/// Handles are cheap to clone. Cloning a handle does not copy the texture; every clone refers to
/// the same host-side storage, and compares equal to it.
pub trait Texture: Clone + Debug + PartialEq {
    /// Frees the host-side storage behind this texture. After this has been called, no clone of
    /// the handle may be used again.
    fn release(self);
}

/// Where the texture in a slot came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    /// The host assigned this texture itself.
    Original,

    /// The texture came from a resource pack and was assigned by the replacer.
    Substituted,
}

/// A texture as it sits in a material slot, tagged with its origin.
///
/// Host adapters wrap every texture they hand over with `SlotTexture::original`. Only the
/// replacer creates substitutes, so a slot holding a substitute can always be recognised without
/// looking at the texture itself.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotTexture<T> {
    origin: Origin,
    texture: T,
}

impl<T> SlotTexture<T> {
    /// Wraps a texture that the host assigned.
    pub fn original(texture: T) -> SlotTexture<T> {
        SlotTexture {
            origin: Origin::Original,
            texture,
        }
    }

    /// Wraps a texture that came from a resource pack.
    pub(crate) fn substitute(texture: T) -> SlotTexture<T> {
        SlotTexture {
            origin: Origin::Substituted,
            texture,
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns `true` if the host assigned this texture.
    pub fn is_original(&self) -> bool {
        self.origin == Origin::Original
    }

    pub fn texture(&self) -> &T {
        &self.texture
    }

    pub fn into_texture(self) -> T {
        self.texture
    }
}
