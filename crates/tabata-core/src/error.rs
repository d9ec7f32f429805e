//! Core error types for tabata-core.
//!
//! The timing engine itself has no error taxonomy: every engine operation
//! is a total function over the current state, and out-of-range navigation
//! requests are silent no-ops. Errors only arise while loading and
//! validating configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for ConfigError
pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
