//! Static thought catalog.
//!
//! The catalog is an ordered, read-only collection of thoughts loaded
//! once at startup from a JSON document (a list under a top-level
//! `"thoughts"` key). A missing or malformed document degrades to an
//! empty catalog -- callers must treat "no thoughts" as a valid,
//! permanently-no-content state.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    pub id: u32,
    /// Primary display text.
    pub text: String,
    /// Secondary display text (translation of `text`).
    #[serde(default)]
    pub translation: String,
    /// Attribution: who said it.
    #[serde(default)]
    pub source: String,
    /// Attribution: where it was said.
    #[serde(default)]
    pub reference: String,
}

/// Wrapper matching the on-disk document shape.
#[derive(Serialize, Deserialize)]
struct CatalogFile {
    thoughts: Vec<Thought>,
}

/// Ordered, index-addressable thought collection.
///
/// Immutable after load; no mutation API is exposed.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    thoughts: Vec<Thought>,
}

/// Catalog shipped with the binary, used when no user catalog exists.
const BUILTIN: &str = include_str!("../assets/thoughts.json");

impl Catalog {
    /// The built-in catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN).unwrap_or_else(|e| {
            warn!("built-in catalog is malformed: {e}");
            Self::default()
        })
    }

    /// Load a catalog from `path`, falling back to an empty catalog on
    /// any error. The failure is logged, not propagated.
    pub fn load(path: &Path) -> Self {
        Self::try_load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), "failed to load catalog: {e}");
            Self::default()
        })
    }

    /// Strict variant of [`Catalog::load`].
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the file is missing or does not
    /// parse as a catalog document.
    pub fn try_load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(content)?;
        Ok(Self {
            thoughts: file.thoughts,
        })
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Thought> {
        self.thoughts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter()
    }
}
