pub mod config;
pub mod run;
pub mod stats;
pub mod thought;

use ponder_core::{storage, Catalog};

/// Open the user catalog if one exists in the data directory,
/// otherwise fall back to the built-in catalog.
pub fn open_catalog() -> Result<Catalog, Box<dyn std::error::Error>> {
    let path = storage::catalog_path()?;
    if path.exists() {
        Ok(Catalog::load(&path))
    } else {
        Ok(Catalog::builtin())
    }
}
