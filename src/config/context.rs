//! Scoped configuration overrides.

use std::marker::PhantomData;

use super::registry::ConfigRegistry;
use super::types::Config;

/// Restores the configuration captured by `config_context` when dropped.
///
/// Restoration runs on every exit path, including `?` returns and panics
/// unwinding through the scope. Every parameter is restored, not only the
/// ones the context changed. The guard is tied to the thread that created it.
#[must_use = "the configuration is restored as soon as the guard is dropped"]
pub struct ConfigGuard<'a> {
    registry: &'a ConfigRegistry,
    saved: Config,
    local_threadsafe: bool,
    _not_send: PhantomData<*const ()>,
}

impl<'a> ConfigGuard<'a> {
    pub(crate) fn new(registry: &'a ConfigRegistry, saved: Config, local_threadsafe: bool) -> Self {
        Self {
            registry,
            saved,
            local_threadsafe,
            _not_send: PhantomData,
        }
    }

    /// Configuration that will be restored on drop
    pub fn saved_config(&self) -> &Config {
        &self.saved
    }
}

impl Drop for ConfigGuard<'_> {
    fn drop(&mut self) {
        self.registry.restore(&self.saved, self.local_threadsafe);
    }
}

impl std::fmt::Debug for ConfigGuard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigGuard")
            .field("saved", &self.saved)
            .field("local_threadsafe", &self.local_threadsafe)
            .finish()
    }
}
