//! Parameter value types.
//!
//! Configuration values are dynamic (`serde_json::Value`) so that any candidate,
//! well-formed or not, can reach validation. `ValueKind` is the type tag used by
//! expected-type checks and `TypeSpec` is how a parameter declares them.

use serde_json::Value;
use std::fmt;

/// Type tag of a parameter value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Classify a value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Check whether `value` is of this kind
    pub fn matches(&self, value: &Value) -> bool {
        Self::of(value) == *self
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => write!(f, "null"),
            ValueKind::Bool => write!(f, "bool"),
            ValueKind::Integer => write!(f, "integer"),
            ValueKind::Float => write!(f, "float"),
            ValueKind::String => write!(f, "string"),
            ValueKind::Array => write!(f, "array"),
            ValueKind::Object => write!(f, "object"),
        }
    }
}

/// Expected-type declaration for a parameter.
///
/// `Any` and an empty `Many` both mean "no type restriction".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeSpec {
    #[default]
    Any,
    One(ValueKind),
    Many(Vec<ValueKind>),
}

impl TypeSpec {
    /// Normalize to an ordered, duplicate-free list of kinds.
    /// An empty list means unrestricted.
    pub fn kinds(&self) -> Vec<ValueKind> {
        match self {
            TypeSpec::Any => Vec::new(),
            TypeSpec::One(kind) => vec![*kind],
            TypeSpec::Many(kinds) => {
                let mut out = Vec::with_capacity(kinds.len());
                for kind in kinds {
                    if !out.contains(kind) {
                        out.push(*kind);
                    }
                }
                out
            }
        }
    }
}

impl From<ValueKind> for TypeSpec {
    fn from(kind: ValueKind) -> Self {
        TypeSpec::One(kind)
    }
}

impl From<Vec<ValueKind>> for TypeSpec {
    fn from(kinds: Vec<ValueKind>) -> Self {
        TypeSpec::Many(kinds)
    }
}

impl From<&[ValueKind]> for TypeSpec {
    fn from(kinds: &[ValueKind]) -> Self {
        TypeSpec::Many(kinds.to_vec())
    }
}
