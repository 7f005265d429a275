//! Configuration Updates
//!
//! A `ConfigUpdate` is the argument to `set_config` and `config_context`: a set
//! of parameter name/value pairs plus the `local_threadsafe` flag. Names are not
//! checked here; the registry checks every name in one pass before mutating.
//!
//! Updates can be built three ways:
//! 1. Builder methods (`ConfigUpdate::new().data_container(..)`)
//! 2. Keyword text (`ConfigUpdate::parse("data_container=pandas")`)
//! 3. Any figment (`ConfigUpdate::from_figment(&figment)`), e.g. from TOML

use figment::{
    Figment,
    providers::{Format, Toml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::types::Config;
use crate::constants::params;
use crate::types::{DachshundError, Result};

/// Requested parameter changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    /// Parameter values; `null` means "leave unchanged"
    #[serde(flatten)]
    values: BTreeMap<String, Value>,

    /// Apply to the calling thread only
    #[serde(default)]
    local_threadsafe: bool,
}

impl ConfigUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a `data_container` change
    pub fn data_container(self, value: impl Into<Value>) -> Self {
        self.param(params::DATA_CONTAINER, value)
    }

    /// Request a change to any parameter by name
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn local_threadsafe(mut self, local_threadsafe: bool) -> Self {
        self.local_threadsafe = local_threadsafe;
        self
    }

    pub fn is_local_threadsafe(&self) -> bool {
        self.local_threadsafe
    }

    /// Requested name/value pairs, `null` values included
    pub fn values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Update carrying every entry of a snapshot
    pub fn from_config(config: &Config) -> Self {
        Self {
            values: config
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            local_threadsafe: false,
        }
    }

    /// Build from keyword pairs. `local_threadsafe` is taken as the flag and
    /// must be a boolean.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut update = Self::new();
        for (name, value) in pairs {
            let name = name.into();
            let value = value.into();
            if name == params::LOCAL_THREADSAFE {
                update.local_threadsafe = value.as_bool().ok_or_else(|| {
                    DachshundError::malformed(format!(
                        "{} expects true or false, got {}",
                        params::LOCAL_THREADSAFE,
                        value
                    ))
                })?;
            } else {
                update.values.insert(name, value);
            }
        }
        Ok(update)
    }

    /// Parse keyword text such as `data_container=pandas local_threadsafe=true`.
    ///
    /// Tokens are separated by whitespace or commas. A token without `=` is a
    /// positional argument and is rejected. Values are read as JSON when
    /// possible (`7`, `true`, `null`, `["a","b"]`), otherwise as plain strings.
    pub fn parse(input: &str) -> Result<Self> {
        let mut pairs = Vec::new();
        for token in input
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
        {
            let Some((name, raw)) = token.split_once('=') else {
                return Err(DachshundError::positional(token));
            };
            if name.is_empty() {
                return Err(DachshundError::positional(token));
            }
            let value = serde_json::from_str::<Value>(raw)
                .unwrap_or_else(|_| Value::String(raw.to_string()));
            pairs.push((name.to_string(), value));
        }
        Self::from_pairs(pairs)
    }

    /// Extract an update from a figment
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }

    /// Extract an update from a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Self::from_figment(&Figment::from(Toml::string(toml)))
    }
}
