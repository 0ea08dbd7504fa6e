//! A pack whose resources have already been loaded into memory.

use std::{collections::HashMap, io::Read};

use eyre::{Context, Result};

use super::{Pack, PackTexture};
use crate::colour::ColourBundle;

/// Parses a colour table, which maps object names to colour bundles.
///
/// ```json
/// {
///     "Office 02": {
///         "use_variation": true,
///         "colour0": { "r": 1.0, "g": 1.0, "b": 1.0, "a": 1.0 },
///         ...
///     }
/// }
/// ```
pub fn load_colour_table(reader: impl Read) -> Result<HashMap<String, ColourBundle>> {
    serde_json::from_reader(reader).wrap_err("Malformed colour table")
}

/// A pack that holds its textures and colour bundles in memory.
///
/// Textures stay in the pack's storage, so lookups hand out shared handles that the receiver must
/// not release.
pub struct MemoryPack<T> {
    identity: String,
    textures: HashMap<String, T>,
    colours: HashMap<String, ColourBundle>,
}

impl<T: Clone> MemoryPack<T> {
    pub fn new(identity: impl Into<String>) -> MemoryPack<T> {
        MemoryPack {
            identity: identity.into(),
            textures: HashMap::new(),
            colours: HashMap::new(),
        }
    }

    /// Adds a texture under the logical name `name`, replacing any texture that was already there.
    pub fn insert_texture(&mut self, name: impl Into<String>, texture: T) {
        self.textures.insert(name.into(), texture);
    }

    pub fn insert_colours(&mut self, object: impl Into<String>, colours: ColourBundle) {
        self.colours.insert(object.into(), colours);
    }

    /// Reads a colour table from `reader` and merges it into this pack. Entries in the table take
    /// the place of any bundles already held for the same objects.
    pub fn load_colours(&mut self, reader: impl Read) -> Result<usize> {
        let table = load_colour_table(reader)
            .wrap_err_with(|| format!("While loading colours for pack '{}'", self.identity))?;

        let count = table.len();
        self.colours.extend(table);

        log::info!("Loaded {} colour bundle(s) into '{}'", count, self.identity);
        Ok(count)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}

impl<T: Clone> Pack<T> for MemoryPack<T> {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn texture(&self, name: &str) -> Option<PackTexture<T>> {
        self.textures.get(name).cloned().map(PackTexture::Shared)
    }

    fn colours(&self, object: &str) -> Option<ColourBundle> {
        self.colours.get(object).copied()
    }
}
