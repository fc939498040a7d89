//! Configuration error types.

use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for the expected shape
    #[error("Configuration parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    /// A state name does not match any kind of the machine
    #[error("Unknown state kind {name:?}")]
    UnknownKind { name: String },

    /// One or more values are out of range; every violation is listed
    #[error("Invalid configuration ({} violations)", .0.len())]
    Invalid(Vec<ConfigViolation>),
}

/// A single out-of-range configuration value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{field} must be a finite, non-negative number (got {value})")]
    NegativeOrNonFinite { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must only contain finite coordinates")]
    NonFinitePoint { field: &'static str },

    #[error("{field} must be at least 1")]
    ZeroLimit { field: &'static str },
}
