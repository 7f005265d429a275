//! Dachshund - Configuration for Multi-Backend Data Access
//!
//! Process-wide, thread-aware configuration that selects which data container
//! (lazy or eager polars, pandas, modin, dask, numpy, xarray) data-loading code
//! returns.
//!
//! ## Core Features
//!
//! - **Validated parameters**: invalid values are replaced and logged, never stored
//! - **Thread isolation**: each thread reads its own copy, seeded from the global layer
//! - **Scoped overrides**: guards restore the previous configuration on every exit path
//!
//! ## Quick Start
//!
//! ```no_run
//! use dachshund::{ConfigUpdate, DataContainer};
//!
//! dachshund::set_config(ConfigUpdate::new().data_container(DataContainer::Pandas))?;
//! assert_eq!(dachshund::get_config().data_container(), Some(DataContainer::Pandas));
//!
//! {
//!     let _guard = dachshund::config_context(
//!         ConfigUpdate::new().data_container(DataContainer::Numpy),
//!     )?;
//!     assert_eq!(dachshund::get_config().data_container(), Some(DataContainer::Numpy));
//! }
//!
//! dachshund::reset_config();
//! assert_eq!(dachshund::get_config(), dachshund::get_default_config());
//! # Ok::<(), dachshund::DachshundError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Parameter settings, registry, updates, and scoped guards
//! - [`constants`]: Container tables and parameter names
//! - [`types`]: Errors and value kinds

pub mod config;
pub mod constants;
pub mod types;

#[cfg(test)]
mod test_support;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use config::{
    Config, ConfigGuard, ConfigRegistry, ConfigUpdate, DataContainer, ParamSetting,
};
pub use types::{DachshundError, InvalidArgument, Result, TypeSpec, ValueKind};

// =============================================================================
// Process-wide API
// =============================================================================

/// Default configuration (always a fresh copy)
pub fn get_default_config() -> Config {
    ConfigRegistry::global().get_default_config()
}

/// The calling thread's current configuration
pub fn get_config() -> Config {
    ConfigRegistry::global().get_config()
}

/// Update configuration; see [`ConfigRegistry::set_config`]
pub fn set_config(update: ConfigUpdate) -> Result<()> {
    ConfigRegistry::global().set_config(update)
}

/// Restore thread and global configuration to the defaults
pub fn reset_config() {
    ConfigRegistry::global().reset_config()
}

/// Override configuration until the returned guard is dropped
pub fn config_context(update: ConfigUpdate) -> Result<ConfigGuard<'static>> {
    ConfigRegistry::global().config_context(update)
}

/// Run `f` with configuration overridden for its duration
pub fn with_config<R>(update: ConfigUpdate, f: impl FnOnce() -> R) -> Result<R> {
    ConfigRegistry::global().with_config(update, f)
}
