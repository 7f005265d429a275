//! Configuration Registry
//!
//! Owns the parameter settings and three configuration layers:
//! 1. Defaults (derived once from the settings, never mutated)
//! 2. Global config (shared by all threads, updated by non-threadsafe writes)
//! 3. Thread-local config (copied from global on a thread's first access,
//!    independent afterwards; this is what `get_config` returns)
//!
//! A process-wide instance is available through [`ConfigRegistry::global`].
//! Independent instances can be built with [`ConfigRegistry::new`]; each one
//! keeps its own per-thread state. Entries left behind by dropped registries
//! are pruned the next time a thread touches any registry.

use serde_json::Value;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, RwLock};

use tracing::debug;

use super::context::ConfigGuard;
use super::param::ParamSetting;
use super::types::Config;
use super::update::ConfigUpdate;
use crate::constants::{containers, messages, params};
use crate::types::{DachshundError, Result, ValueKind};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

/// Ids of registries that have not been dropped
static LIVE_REGISTRIES: LazyLock<RwLock<HashSet<u64>>> =
    LazyLock::new(|| RwLock::new(HashSet::new()));

/// Bumped on every registry drop so threads know to prune
static DROP_EPOCH: AtomicU64 = AtomicU64::new(0);

static GLOBAL_REGISTRY: LazyLock<ConfigRegistry> = LazyLock::new(ConfigRegistry::builtin);

thread_local! {
    static THREAD_CONFIGS: RefCell<ThreadConfigs> = RefCell::new(ThreadConfigs::default());
}

/// Per-thread configuration, keyed by registry id
#[derive(Default)]
struct ThreadConfigs {
    /// `DROP_EPOCH` value at the last prune
    epoch: u64,
    configs: HashMap<u64, Config>,
}

impl ThreadConfigs {
    /// Drop entries of registries that no longer exist
    fn prune(&mut self) {
        let epoch = DROP_EPOCH.load(Ordering::Acquire);
        if epoch == self.epoch {
            return;
        }
        let live = LIVE_REGISTRIES.read().unwrap_or_else(|poisoned| {
            tracing::error!("Live registry RwLock poisoned on read, recovering");
            poisoned.into_inner()
        });
        self.configs.retain(|id, _| live.contains(id));
        self.epoch = epoch;
    }
}

/// Settings shipped with the crate
pub fn builtin_settings() -> Vec<ParamSetting> {
    vec![
        ParamSetting::new(params::DATA_CONTAINER, containers::DEFAULT_DATA_CONTAINER)
            .expected_type(ValueKind::String)
            .allowed_values(containers::DATA_CONTAINER_VALUES),
    ]
}

/// Registry of parameter settings with global and per-thread configuration
pub struct ConfigRegistry {
    id: u64,
    settings: BTreeMap<String, ParamSetting>,
    defaults: Config,
    global: RwLock<Config>,
}

impl ConfigRegistry {
    /// Build a registry from parameter settings. A later setting with the same
    /// name replaces an earlier one.
    pub fn new(settings: impl IntoIterator<Item = ParamSetting>) -> Self {
        let settings: BTreeMap<String, ParamSetting> = settings
            .into_iter()
            .map(|s| (s.name().to_string(), s))
            .collect();
        let defaults: Config = settings
            .values()
            .map(|s| (s.name().to_string(), s.default_value().clone()))
            .collect();

        let id = NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed);
        LIVE_REGISTRIES
            .write()
            .unwrap_or_else(|poisoned| {
                tracing::error!("Live registry RwLock poisoned, recovering");
                poisoned.into_inner()
            })
            .insert(id);

        Self {
            id,
            global: RwLock::new(defaults.clone()),
            settings,
            defaults,
        }
    }

    /// Registry with the built-in parameters
    pub fn builtin() -> Self {
        Self::new(builtin_settings())
    }

    /// Process-wide registry used by the crate-level functions
    pub fn global() -> &'static ConfigRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn settings(&self) -> impl Iterator<Item = &ParamSetting> {
        self.settings.values()
    }

    pub fn setting(&self, name: &str) -> Option<&ParamSetting> {
        self.settings.get(name)
    }

    // =========================================================================
    // Public Operations
    // =========================================================================

    /// Fresh copy of the default configuration
    pub fn get_default_config(&self) -> Config {
        self.defaults.clone()
    }

    /// Fresh copy of the calling thread's configuration
    pub fn get_config(&self) -> Config {
        self.with_local(|local| local.clone())
    }

    /// Fresh copy of the shared global layer
    pub fn get_global_config(&self) -> Config {
        self.read_global()
    }

    /// Apply an update.
    ///
    /// Unknown parameter names fail with `InvalidArgument` before anything
    /// changes. `null` values are skipped. Invalid values keep the thread's
    /// current value and log a warning. Unless `local_threadsafe` is set, the
    /// resulting thread configuration is also copied into the global layer.
    pub fn set_config(&self, update: ConfigUpdate) -> Result<()> {
        self.check_names(&update)?;
        self.apply(update.values(), update.is_local_threadsafe());
        Ok(())
    }

    /// Restore thread and global configuration to the defaults
    pub fn reset_config(&self) {
        let update = ConfigUpdate::from_config(&self.defaults);
        self.apply(update.values(), false);
    }

    /// Apply an update until the returned guard is dropped.
    ///
    /// The guard restores every parameter to its value at entry, using the
    /// same `local_threadsafe` mode.
    pub fn config_context(&self, update: ConfigUpdate) -> Result<ConfigGuard<'_>> {
        self.check_names(&update)?;
        let saved = self.get_config();
        let local_threadsafe = update.is_local_threadsafe();
        self.apply(update.values(), local_threadsafe);
        Ok(ConfigGuard::new(self, saved, local_threadsafe))
    }

    /// Run `f` inside a `config_context`
    pub fn with_config<R>(&self, update: ConfigUpdate, f: impl FnOnce() -> R) -> Result<R> {
        let _guard = self.config_context(update)?;
        Ok(f())
    }

    // =========================================================================
    // Internal
    // =========================================================================

    pub(crate) fn restore(&self, saved: &Config, local_threadsafe: bool) {
        let update = ConfigUpdate::from_config(saved).local_threadsafe(local_threadsafe);
        self.apply(update.values(), update.is_local_threadsafe());
    }

    fn check_names(&self, update: &ConfigUpdate) -> Result<()> {
        match update.names().find(|name| !self.settings.contains_key(*name)) {
            Some(name) => Err(DachshundError::unknown_parameter(name)),
            None => Ok(()),
        }
    }

    /// Validate each pair against the thread's current values and store the
    /// result. Names must already be known.
    fn apply<'a>(&self, values: impl Iterator<Item = (&'a str, &'a Value)>, local_threadsafe: bool) {
        let mut local = self.get_config();

        for (name, value) in values {
            if value.is_null() {
                continue;
            }
            let Some(setting) = self.settings.get(name) else {
                continue;
            };
            let resolved = setting.get_valid_param_or_default(
                value,
                local.get(name),
                messages::INVALID_SET_VALUE,
            );
            local.insert(name, resolved);
        }

        if !local_threadsafe {
            let mut global = self.global.write().unwrap_or_else(|poisoned| {
                tracing::error!("Global config RwLock poisoned, recovering");
                poisoned.into_inner()
            });
            global.update(&local);
        }

        debug!(registry = self.id, local_threadsafe, config = ?local, "Configuration updated");
        self.with_local(|current| *current = local);
    }

    fn read_global(&self) -> Config {
        self.global
            .read()
            .unwrap_or_else(|poisoned| {
                tracing::error!("Global config RwLock poisoned on read, recovering");
                poisoned.into_inner()
            })
            .clone()
    }

    /// Run `f` on this thread's config, seeding it from global on first use
    fn with_local<R>(&self, f: impl FnOnce(&mut Config) -> R) -> R {
        THREAD_CONFIGS.with(|state| {
            let mut state = state.borrow_mut();
            state.prune();
            let local = state
                .configs
                .entry(self.id)
                .or_insert_with(|| self.read_global());
            f(local)
        })
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Drop for ConfigRegistry {
    fn drop(&mut self) {
        LIVE_REGISTRIES
            .write()
            .unwrap_or_else(|poisoned| {
                tracing::error!("Live registry RwLock poisoned, recovering");
                poisoned.into_inner()
            })
            .remove(&self.id);
        DROP_EPOCH.fetch_add(1, Ordering::Release);

        let _ = THREAD_CONFIGS.try_with(|state| state.borrow_mut().configs.remove(&self.id));
    }
}

impl std::fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("id", &self.id)
            .field("settings", &self.settings.keys().collect::<Vec<_>>())
            .field("defaults", &self.defaults)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
