//! Core error types for ponder-core.
//!
//! None of these is fatal to the process. Load failures degrade to
//! defaults (or an empty catalog) and are logged; write failures are
//! logged while the in-memory value stays authoritative.

use thiserror::Error;

/// Errors while loading the thought catalog.
///
/// Callers degrade to an empty catalog on any of these.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors in the persisted scheduler configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read/write config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unknown config key: {0}")]
    UnknownKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors in the persisted rotation state.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("failed to read/write state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse state JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
