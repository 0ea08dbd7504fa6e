use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

/// An on/off option.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Toggle {
    Enabled,
    Disabled,
}

impl Toggle {
    pub fn is_enabled(self) -> bool {
        matches!(self, Toggle::Enabled)
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Toggle::Enabled
    }
}

/// How much the replacer writes to its log.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Diagnostics {
    /// Only summaries, warnings and errors. This is the default.
    Quiet,

    /// Every replacement and restoration is logged.
    Verbose,
}

impl Diagnostics {
    /// Returns the most detailed log level that should be recorded.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Diagnostics::Quiet => log::LevelFilter::Info,
            Diagnostics::Verbose => log::LevelFilter::Trace,
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Diagnostics::Quiet
    }
}

/// The user's replacer settings.
#[derive(Clone, Copy, Default, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Options {
    /// Whether prefab textures are replaced with pack textures.
    pub textures: Toggle,

    /// Whether colour variations from packs are applied.
    pub colours: Toggle,

    pub diagnostics: Diagnostics,

    /// Whether the original textures and colours are put back when the session ends. When this
    /// is off, the replacements still on screen are handed to the host instead of being released.
    pub restore_on_release: Toggle,
}

impl Options {
    /// Reads options from JSON. Missing fields take their default values.
    fn from_json(reader: impl Read) -> Result<Options> {
        let options = serde_json::from_reader(reader)?;
        Ok(options)
    }

    /// Reads the settings file at `path`, if there is one.
    fn read_file(path: &Path) -> Result<Option<Options>> {
        if !path.exists() {
            return Ok(None);
        }

        let file = File::open(path).wrap_err_with(|| format!("Unable to open {:?}", path))?;

        let options = Options::from_json(file)
            .wrap_err_with(|| format!("{:?} is not a valid settings file", path))?;

        Ok(Some(options))
    }

    /// Loads the settings at `path`. Falls back to the defaults if the file is missing or can't
    /// be read.
    pub fn load(path: impl AsRef<Path>) -> Options {
        let path = path.as_ref();

        match Options::read_file(path) {
            Ok(Some(options)) => {
                log::info!("Replacer settings read from {:?}", path);
                options
            }

            Ok(None) => {
                log::info!("{:?} does not exist, so the replacer uses its defaults", path);
                Options::default()
            }

            Err(err) => {
                log::error!("Ignoring replacer settings: {err:?}");
                Options::default()
            }
        }
    }

    /// Writes the settings to `path` as pretty-printed JSON.
    pub fn try_save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        std::fs::write(path, json).wrap_err_with(|| format!("Unable to write {:?}", path))
    }

    /// Writes the settings to `path`, logging the outcome instead of returning it.
    pub fn save(&self, path: impl AsRef<Path>) {
        match self.try_save(path) {
            Ok(()) => log::info!("Replacer settings written"),
            Err(err) => log::error!("Replacer settings were not written: {err:?}"),
        }
    }

    /// Returns the path of the settings file inside `dir`.
    pub fn path_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join("settings.replacer.json")
    }
}
