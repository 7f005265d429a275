//! Parameter Settings
//!
//! Validation and normalization rules for a single named parameter.
//!
//! ## Validity rule
//!
//! When a parameter declares allowed values, membership in that list is the
//! only test and the expected type is not consulted. The expected type is used
//! only for parameters without an allowed-value list. A parameter with neither
//! accepts everything.
//!
//! Membership compares numbers by value, so `3.0` matches an allowed `3`.
//! Booleans never match numbers.

use serde_json::Value;
use tracing::warn;

use crate::types::{TypeSpec, ValueKind};

/// Describes one configurable parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSetting {
    name: String,
    expected_type: TypeSpec,
    allowed_values: Vec<Value>,
    default_value: Value,
}

impl ParamSetting {
    /// Create an unconstrained parameter with a default
    pub fn new(name: impl Into<String>, default_value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            expected_type: TypeSpec::Any,
            allowed_values: Vec::new(),
            default_value: default_value.into(),
        }
    }

    /// Set the expected type declaration
    pub fn expected_type(mut self, spec: impl Into<TypeSpec>) -> Self {
        self.expected_type = spec.into();
        self
    }

    /// Set the allowed values. Duplicates are dropped, first occurrence wins.
    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut allowed: Vec<Value> = Vec::new();
        for value in values.into_iter().map(Into::into) {
            if !allowed.iter().any(|a| same_value(a, &value)) {
                allowed.push(value);
            }
        }
        self.allowed_values = allowed;
        self
    }

    /// Set the allowed values from a single dynamic value.
    ///
    /// `null` clears the restriction, an array contributes its elements, and
    /// any other value becomes a one-element list.
    pub fn allowed_values_from(self, value: Value) -> Self {
        match value {
            Value::Null => self.allowed_values(Vec::<Value>::new()),
            Value::Array(items) => self.allowed_values(items),
            scalar => self.allowed_values([scalar]),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Allowed values; empty means "defer to the type check"
    pub fn get_allowed_values(&self) -> &[Value] {
        &self.allowed_values
    }

    /// Expected kinds; empty means "no type restriction"
    pub fn get_expected_type(&self) -> Vec<ValueKind> {
        self.expected_type.kinds()
    }

    pub fn is_valid_param_value(&self, value: &Value) -> bool {
        if !self.allowed_values.is_empty() {
            return self.allowed_values.iter().any(|a| same_value(a, value));
        }

        let kinds = self.get_expected_type();
        kinds.is_empty() || kinds.iter().any(|kind| kind.matches(value))
    }

    /// Return `value` if valid, otherwise warn and fall back.
    ///
    /// The fallback is `default_value` when given, else the parameter's own
    /// default. The warning text starts with `msg`.
    pub fn get_valid_param_or_default(
        &self,
        value: &Value,
        default_value: Option<&Value>,
        msg: &str,
    ) -> Value {
        if self.is_valid_param_value(value) {
            return value.clone();
        }

        let fallback = default_value.unwrap_or(&self.default_value);
        warn!(
            param = %self.name,
            value = %value,
            "{}When setting global config values for `{}`, the value {} is not valid; using {} instead.",
            msg,
            self.name,
            value,
            fallback
        );
        fallback.clone()
    }
}

/// Equality with numbers compared by value
fn same_value(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                x == y
            } else {
                x.as_f64().zip(y.as_f64()).is_some_and(|(x, y)| x == y)
            }
        }
        _ => a == b,
    }
}
