//! Configuration Management
//!
//! Process-wide, thread-aware configuration with layered resolution:
//! 1. Built-in defaults
//! 2. Global config (shared across threads)
//! 3. Thread-local config (what callers observe)
//! 4. Scoped overrides (restored when their guard drops)

mod context;
mod param;
mod registry;
mod types;
mod update;

pub use context::ConfigGuard;
pub use param::ParamSetting;
pub use registry::{ConfigRegistry, builtin_settings};
pub use types::*;
pub use update::ConfigUpdate;
