//! Thought rotation and streak state machine.
//!
//! Rotation advances through the catalog at most once per calendar day:
//! the first pick on a new day key moves the cursor, bumps the counters
//! and persists; every later pick on the same day replays the same
//! index without touching state. `-1` encodes "never shown".
//!
//! Day keys are [`NaiveDate`] values, so comparisons are locale
//! independent. Whether the key is derived from local or UTC time is
//! the caller's policy -- the state machine only compares keys.

use std::path::PathBuf;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::StateError;

/// Persisted rotation cursor and streak counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationState {
    /// Day key of the last rotation advance.
    pub last_shown: Option<NaiveDate>,
    /// Index of the last shown thought; -1 means never shown.
    pub current_index: i64,
    /// Total advances ever performed. Monotone non-decreasing.
    pub total_shown: u64,
    /// Consecutive active days, counting today.
    pub streak_days: u32,
    /// Day key of the last activity, for streak accounting.
    pub last_active: Option<NaiveDate>,
}

impl Default for RotationState {
    fn default() -> Self {
        Self {
            last_shown: None,
            current_index: -1,
            total_shown: 0,
            streak_days: 0,
            last_active: None,
        }
    }
}

/// Derived statistics, pure read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_thoughts: usize,
    pub current_streak: u32,
    pub total_shown: u64,
}

/// Rotation state plus its backing file.
///
/// State is rewritten wholesale after every mutation. A missing or
/// corrupt file on load is a cold start: defaults are used and
/// immediately re-persisted. A failed write is logged and the
/// in-memory state stays authoritative.
#[derive(Debug)]
pub struct Rotation {
    state: RotationState,
    path: PathBuf,
}

impl Rotation {
    /// Load rotation state from `path`, or start fresh.
    pub fn load(path: PathBuf) -> Self {
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(state) => state,
                Err(e) => {
                    warn!(path = %path.display(), "corrupt rotation state, starting fresh: {e}");
                    RotationState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no rotation state yet, starting fresh");
                RotationState::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "cannot read rotation state, starting fresh: {e}");
                RotationState::default()
            }
        };
        let rotation = Self { state, path };
        if rotation.state == RotationState::default() {
            rotation.persist();
        }
        rotation
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    /// Pick the thought index for `today`.
    ///
    /// Returns `None` for an empty catalog. The first call on a new day
    /// key advances the cursor (wrapping), bumps `total_shown`, updates
    /// the streak and persists; repeated calls on the same day key
    /// replay the stored index with no mutation and no write, so a
    /// reminder may fire any number of times per day without skipping
    /// catalog entries.
    pub fn pick_for_today(&mut self, catalog_len: usize, today: NaiveDate) -> Option<usize> {
        if catalog_len == 0 {
            return None;
        }

        // Idempotent replay: already advanced today. The index bound
        // check covers a catalog that shrank since the last run.
        if self.state.last_shown == Some(today)
            && self.state.current_index >= 0
            && (self.state.current_index as usize) < catalog_len
        {
            return Some(self.state.current_index as usize);
        }

        let next = (self.state.current_index + 1).rem_euclid(catalog_len as i64) as usize;
        self.state.current_index = next as i64;
        self.state.total_shown += 1;
        self.bump_streak(today);
        self.state.last_shown = Some(today);
        self.state.last_active = Some(today);
        self.persist();
        Some(next)
    }

    /// Uniform random index, independent of the daily rotation.
    ///
    /// Never mutates or persists state -- ad-hoc display does not
    /// affect rotation bookkeeping.
    pub fn pick_random(&self, catalog_len: usize) -> Option<usize> {
        if catalog_len == 0 {
            return None;
        }
        Some(rand::thread_rng().gen_range(0..catalog_len))
    }

    pub fn stats(&self, catalog_len: usize) -> Statistics {
        Statistics {
            total_thoughts: catalog_len,
            current_streak: self.state.streak_days,
            total_shown: self.state.total_shown,
        }
    }

    fn bump_streak(&mut self, today: NaiveDate) {
        match self.state.last_active {
            None => self.state.streak_days = 1,
            Some(prev) => {
                let gap = (today - prev).num_days();
                if gap == 1 {
                    self.state.streak_days += 1;
                } else if gap > 1 {
                    self.state.streak_days = 1;
                }
                // gap == 0 is filtered by the replay branch; if it still
                // occurs (e.g. index out of range after a catalog
                // change) the streak must not double-count the day.
                // gap < 0 (clock moved backwards) leaves the streak as is.
            }
        }
    }

    fn persist(&self) {
        let result = serde_json::to_string_pretty(&self.state)
            .map_err(StateError::from)
            .and_then(|json| std::fs::write(&self.path, json).map_err(StateError::from));
        if let Err(e) = result {
            warn!(path = %self.path.display(), "failed to persist rotation state: {e}");
        }
    }
}
