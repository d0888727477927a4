use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What caused a reminder signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// The repeating interval timer fired.
    Interval,
    /// Explicit user request.
    Manual,
    /// The one-shot fire shortly after process start.
    Startup,
}

/// Every externally visible state change in the reminder loop produces
/// an Event. The CLI logs them; a GUI shell could subscribe instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A thought was handed to the presentation surface.
    ReminderShown {
        thought_id: u32,
        index: usize,
        trigger: Trigger,
        at: DateTime<Utc>,
    },
    /// A fire arrived while the surface was already open; it was
    /// focused instead and rotation state was left untouched.
    ReminderRefocused {
        trigger: Trigger,
        at: DateTime<Utc>,
    },
    /// A fire arrived but the catalog is empty.
    NoContent {
        trigger: Trigger,
        at: DateTime<Utc>,
    },
    /// The surface was closed, either by the user or by the
    /// auto-dismiss deadline.
    ReminderDismissed {
        by_user: bool,
        at: DateTime<Utc>,
    },
    SchedulerStarted {
        interval_ms: u64,
        at: DateTime<Utc>,
    },
    SchedulerStopped {
        at: DateTime<Utc>,
    },
}
