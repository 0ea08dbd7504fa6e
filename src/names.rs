//! Derives the logical names that resource packs use for replacement textures.
//!
//! A logical name depends only on the prefab, the material slot and the level of detail. Two slots
//! that derive the same name share one cached replacement.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::texture::SlotTexture;

/// The texture properties a prefab material exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum TextureSlot {
    /// Diffuse colour.
    #[strum(serialize = "_MainTex")]
    Main,

    /// Normal X/Y and specular.
    #[strum(serialize = "_XYSMap")]
    Xys,

    /// Alpha, colour mask and illumination.
    #[strum(serialize = "_ACIMap")]
    Aci,

    #[strum(serialize = "_APRMap")]
    Apr,
}

impl TextureSlot {
    /// Returns every slot, in the order they are processed.
    pub fn all() -> impl Iterator<Item = TextureSlot> {
        TextureSlot::iter()
    }

    /// The material property name for this slot.
    pub fn property(self) -> &'static str {
        self.into()
    }

    /// The suffix used for this slot in replacement file names.
    fn suffix(self) -> &'static str {
        match self {
            TextureSlot::Main => "d",
            TextureSlot::Xys => "xys",
            TextureSlot::Aci => "aci",
            TextureSlot::Apr => "apr",
        }
    }
}

/// Which representation of a prefab a material belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Detail {
    /// The full-detail model.
    Full,

    /// The level-of-detail model shown at a distance.
    Lod,
}

/// Returns the logical name of the replacement texture for `slot` of `object`'s `detail` model.
///
/// The texture currently assigned to the slot plays no part in the name.
pub fn texture_name(object: &str, slot: TextureSlot, detail: Detail) -> String {
    let lod = match detail {
        Detail::Full => "",
        Detail::Lod => "_lod",
    };

    format!("{}{}_{}.png", object, lod, slot.suffix())
}

/// Returns `true` if `current` is something the host assigned rather than a substitute. Empty
/// slots count as original.
pub fn is_original<T>(current: Option<&SlotTexture<T>>) -> bool {
    current.map_or(true, SlotTexture::is_original)
}
