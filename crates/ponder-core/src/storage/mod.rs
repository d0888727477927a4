//! Storage locations and the persisted scheduler configuration.
//!
//! All persisted artifacts are small JSON files under the data
//! directory, rewritten wholesale on every mutation:
//!
//! - `config.json` -- scheduler/presentation configuration
//! - `state.json` -- rotation cursor and streak counters
//! - `thoughts.json` -- optional user catalog overriding the built-in one

mod config;

pub use config::ReminderConfig;

use std::path::PathBuf;

/// Returns `~/.config/ponder[-dev]/` based on PONDER_ENV.
///
/// Set PONDER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("PONDER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("ponder-dev")
    } else {
        base_dir.join("ponder")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Path of the persisted scheduler configuration.
pub fn config_path() -> std::io::Result<PathBuf> {
    Ok(data_dir()?.join("config.json"))
}

/// Path of the persisted rotation state.
pub fn state_path() -> std::io::Result<PathBuf> {
    Ok(data_dir()?.join("state.json"))
}

/// Path of the optional user catalog.
pub fn catalog_path() -> std::io::Result<PathBuf> {
    Ok(data_dir()?.join("thoughts.json"))
}
