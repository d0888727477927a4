//! # Ponder Core Library
//!
//! Ponder periodically surfaces a short thought in a transient
//! notification, rotating through a static catalog at most once per
//! calendar day and tracking a usage streak across restarts. This
//! library is the scheduling and rotation engine; the CLI binary (and
//! any GUI shell) is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Catalog**: ordered, read-only thought collection loaded once at
//!   startup; a broken catalog degrades to "no content"
//! - **Rotation**: persisted cursor + streak state machine, advancing
//!   at most once per day key
//! - **Scheduler**: repeating tokio timer over a persisted JSON config,
//!   firing signals into an explicit channel
//! - **Coordinator**: consumes fires, enforces the single-surface rule
//!   and hands picked thoughts to a [`Presenter`]
//!
//! Everything runs on one control thread: the coordinator loop applies
//! one signal at a time, so state mutations and persisted writes are
//! naturally sequenced without locks.

pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod rotation;
pub mod scheduler;
pub mod storage;

pub use catalog::{Catalog, Thought};
pub use coordinator::{Presenter, ReminderCoordinator, Signal};
pub use error::{CatalogError, ConfigError, StateError};
pub use events::{Event, Trigger};
pub use rotation::{Rotation, RotationState, Statistics};
pub use scheduler::IntervalScheduler;
pub use storage::ReminderConfig;
