//! Unified Error Type System
//!
//! Centralized error types for the configuration registry.
//!
//! ## Error Categories
//!
//! - **InvalidArgument**: The call itself is malformed (unknown parameter name,
//!   positional argument, unreadable update source). Always surfaced to the
//!   caller and never mutates configuration.
//! - **Invalid values**: Not an error at all. A value that fails validation is
//!   replaced by the current or default value and a warning is logged.

use thiserror::Error;

// =============================================================================
// Invalid Argument
// =============================================================================

/// Programming errors in the shape of a configuration call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidArgument {
    /// Parameter name not present in the registry
    #[error("unexpected keyword argument '{name}'")]
    UnknownParameter { name: String },

    /// Argument supplied without a parameter name
    #[error("positional argument '{token}' not allowed; use name=value")]
    Positional { token: String },

    /// Update source could not be read into name/value pairs
    #[error("malformed configuration update: {message}")]
    Malformed { message: String },
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum DachshundError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DachshundError>;

// =============================================================================
// Helper Functions
// =============================================================================

impl DachshundError {
    /// Create an unknown-parameter error
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::InvalidArgument(InvalidArgument::UnknownParameter { name: name.into() })
    }

    /// Create a positional-argument error
    pub fn positional(token: impl Into<String>) -> Self {
        Self::InvalidArgument(InvalidArgument::Positional {
            token: token.into(),
        })
    }

    /// Create a malformed-update error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::InvalidArgument(InvalidArgument::Malformed {
            message: message.into(),
        })
    }

    /// Check if this error signals a malformed call rather than a runtime fault
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<figment::Error> for DachshundError {
    fn from(err: figment::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

// =============================================================================
// Tests
// =============================================================================
