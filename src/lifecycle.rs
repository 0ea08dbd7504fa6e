//! Entry points for the host's loading sequence.
//!
//! The host creates a `Session` when it starts loading, calls `process_prefab` for each prefab as
//! it is initialised, calls `on_level_loaded` once everything is in place, and finishes with
//! `on_released`. All of these are called from the host's main thread.

use crate::{
    host::{Prefab, PrefabCollection},
    replacer::Replacer,
    settings::Options,
    texture::Texture,
};

/// The ID of the prefab hook plugin, which must be installed for prefabs to be processed while
/// they are initialised.
pub const PREFAB_HOOK_ID: u64 = 530771650;

/// The result of checking whether the plugins the replacer relies on are installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DependencyCheck {
    Ok,

    /// The plugin with this ID is not installed. The host should tell the user.
    MissingDependency(u64),
}

impl DependencyCheck {
    /// Checks the IDs of the host's installed plugins for the prefab hook.
    pub fn check(installed: impl IntoIterator<Item = u64>) -> DependencyCheck {
        if installed.into_iter().any(|id| id == PREFAB_HOOK_ID) {
            DependencyCheck::Ok
        } else {
            DependencyCheck::MissingDependency(PREFAB_HOOK_ID)
        }
    }

    pub fn is_ok(self) -> bool {
        self == DependencyCheck::Ok
    }
}

/// A single load of the host, from creation to release.
pub struct Session<T: Texture> {
    replacer: Replacer<T>,
    options: Options,
    dependency: DependencyCheck,
}

impl<T: Texture> Session<T> {
    /// Starts a session. `installed` holds the IDs of the plugins the host has installed.
    ///
    /// If a dependency is missing, the session is still created, but none of the other hooks will
    /// do anything.
    pub fn on_created(options: Options, installed: impl IntoIterator<Item = u64>) -> Session<T> {
        let dependency = DependencyCheck::check(installed);

        match dependency {
            DependencyCheck::Ok => log::info!("Session created with options {:?}", options),
            DependencyCheck::MissingDependency(id) => {
                log::warn!("Plugin {} is not installed. Nothing will be replaced.", id)
            }
        }

        Session {
            replacer: Replacer::new(),
            options,
            dependency,
        }
    }

    pub fn dependency(&self) -> DependencyCheck {
        self.dependency
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn replacer(&self) -> &Replacer<T> {
        &self.replacer
    }

    /// Gives access to the replacer, for activating packs and for manual replacement.
    pub fn replacer_mut(&mut self) -> &mut Replacer<T> {
        &mut self.replacer
    }

    /// Called by the host while it initialises `prefab`, at most once per prefab per load.
    pub fn process_prefab(&mut self, prefab: &mut impl Prefab<T>) {
        if !self.dependency.is_ok() {
            return;
        }

        if self.options.textures.is_enabled() {
            self.replacer.replace_textures(prefab);
        }

        if self.options.colours.is_enabled() {
            self.replacer.apply_pack_colours(prefab);
        }
    }

    /// Called by the host once the level has finished loading. Returns the dependency check so
    /// that the host can warn the user at a point where it is able to show messages.
    pub fn on_level_loaded<C>(&mut self, prefabs: &mut C) -> DependencyCheck
    where
        C: PrefabCollection<T>,
    {
        if !self.dependency.is_ok() {
            return self.dependency;
        }

        // Catch any prefabs that were initialised before the packs were activated.
        if self.options.textures.is_enabled() {
            self.replacer.replace_all_textures(prefabs);
        }

        self.dependency
    }

    /// Called by the host when the session ends.
    pub fn on_released<C>(&mut self, prefabs: &mut C)
    where
        C: PrefabCollection<T>,
    {
        if !self.dependency.is_ok() {
            return;
        }

        let released = if self.options.restore_on_release.is_enabled() {
            self.replacer.restore_all_textures(prefabs);
            self.replacer.restore_all_colours(prefabs);
            self.replacer.clear_cache()
        } else {
            // The host keeps showing the replacements, so they must outlive the cache.
            self.replacer.clear_cache_keeping_assigned(prefabs)
        };

        log::info!("Session released ({} texture(s) freed)", released);
    }
}
