//! Configuration Types
//!
//! The data container selection and the configuration snapshot handed out by
//! the registry.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Index;

use crate::constants::params;
use crate::types::Result;

// =============================================================================
// Data Container
// =============================================================================

/// Backend representation that data-loading code returns or operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataContainer {
    /// Lazy polars frame (default)
    #[default]
    Polars,
    /// Eagerly collected polars frame
    PolarsEager,
    Pandas,
    Modin,
    Dask,
    Numpy,
    Xarray,
}

impl DataContainer {
    /// All containers in declaration order
    pub const ALL: [DataContainer; 7] = [
        DataContainer::Polars,
        DataContainer::PolarsEager,
        DataContainer::Pandas,
        DataContainer::Modin,
        DataContainer::Dask,
        DataContainer::Numpy,
        DataContainer::Xarray,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataContainer::Polars => "polars",
            DataContainer::PolarsEager => "polars_eager",
            DataContainer::Pandas => "pandas",
            DataContainer::Modin => "modin",
            DataContainer::Dask => "dask",
            DataContainer::Numpy => "numpy",
            DataContainer::Xarray => "xarray",
        }
    }

    /// Returns true for dataframe containers
    pub fn is_dataframe(&self) -> bool {
        !self.is_array()
    }

    /// Returns true for n-dimensional array containers
    pub fn is_array(&self) -> bool {
        matches!(self, DataContainer::Numpy | DataContainer::Xarray)
    }

    /// Only the plain polars selection defers computation
    pub fn is_lazy(&self) -> bool {
        matches!(self, DataContainer::Polars)
    }
}

impl std::fmt::Display for DataContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DataContainer {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        DataContainer::ALL
            .iter()
            .find(|c| c.as_str() == lower)
            .copied()
            .ok_or_else(|| {
                format!(
                    "Unknown data container: {}. Valid values: {}",
                    s,
                    DataContainer::ALL.map(|c| c.as_str()).join(", ")
                )
            })
    }
}

impl From<DataContainer> for Value {
    fn from(container: DataContainer) -> Self {
        Value::String(container.as_str().to_string())
    }
}

// =============================================================================
// Config Snapshot
// =============================================================================

static MISSING: Value = Value::Null;

/// Owned snapshot of parameter name → value.
///
/// Snapshots are always copies; mutating one never affects registry state.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Config(BTreeMap<String, Value>);

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Typed view of the `data_container` selection
    pub fn data_container(&self) -> Option<DataContainer> {
        self.get(params::DATA_CONTAINER)?.as_str()?.parse().ok()
    }

    /// Copy every entry of `other` into `self`
    pub(crate) fn update(&mut self, other: &Config) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| crate::types::DachshundError::Config(e.to_string()))
    }
}

impl Index<&str> for Config {
    type Output = Value;

    /// Missing names index to `Value::Null`, like `serde_json::Value`.
    fn index(&self, name: &str) -> &Value {
        self.0.get(name).unwrap_or(&MISSING)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Config {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Config {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
