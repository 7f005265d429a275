//! Global Constants
//!
//! Parameter names, container tables, and warning text used across the crate.

/// Data container identifiers
pub mod containers {
    /// Every supported data container, in declaration order
    pub const DATA_CONTAINER_VALUES: [&str; 7] = [
        "polars",
        "polars_eager",
        "pandas",
        "modin",
        "dask",
        "numpy",
        "xarray",
    ];

    /// Containers with dataframe semantics
    pub const DATAFRAME_CONTAINER_VALUES: [&str; 5] =
        ["polars", "polars_eager", "pandas", "modin", "dask"];

    /// Containers with n-dimensional array semantics
    pub const ARRAY_CONTAINER_VALUES: [&str; 2] = ["numpy", "xarray"];

    /// Container selected when nothing else is configured
    pub const DEFAULT_DATA_CONTAINER: &str = "polars";
}

/// Registered parameter names
pub mod params {
    pub const DATA_CONTAINER: &str = "data_container";

    /// Update flag accepted alongside parameters; never stored
    pub const LOCAL_THREADSAFE: &str = "local_threadsafe";
}

/// Warning text
pub mod messages {
    /// Prefix used by `set_config` when a value is rejected
    pub const INVALID_SET_VALUE: &str = "Attempting to set an invalid value for a global configuration.\n\
         Using current configuration value of parameter as a result.\n";
}
