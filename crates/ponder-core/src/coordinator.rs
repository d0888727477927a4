//! Reminder coordination.
//!
//! Bridges timer fires to content selection and enforces the
//! single-surface rule: a fire that arrives while the surface is open
//! focuses it instead of re-picking content, so overlapping fires and
//! manual triggers can never advance the rotation twice or stack
//! surfaces.
//!
//! All wiring is an explicit [`Signal`] channel consumed by one event
//! loop -- no ambient globals, no callback registration. The loop runs
//! on a current-thread runtime; mutations are applied one signal at a
//! time, so persisted writes are naturally sequenced.

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, Thought};
use crate::events::{Event, Trigger};
use crate::rotation::Rotation;
use crate::scheduler::IntervalScheduler;
use crate::storage::ReminderConfig;

/// Delay before the one-shot startup reminder.
const STARTUP_FIRE_DELAY: std::time::Duration = std::time::Duration::from_secs(5);

/// Control signals consumed by the coordinator loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A reminder is due.
    Fire(Trigger),
    /// Auto-dismiss deadline for the surface opened at `generation`.
    /// Stale deadlines (from an earlier surface) are ignored.
    DismissDeadline { generation: u64 },
    /// The user closed the surface. Consumed for logging only.
    Dismissed,
    /// Stop the event loop.
    Shutdown,
}

/// The single-instance presentation surface.
///
/// The coordinator guarantees at most one surface is open; the
/// implementation renders it (popup window, terminal, ...). The
/// auto-dismiss timer and the reminder interval timer are independent.
pub trait Presenter {
    fn open(&mut self, thought: &Thought, config: &ReminderConfig);
    fn close(&mut self);
    fn is_open(&self) -> bool;
    fn focus(&mut self);
}

/// Composes the scheduler's fires with the rotation's pick decision
/// and hands the result to the presenter.
pub struct ReminderCoordinator<P> {
    catalog: Catalog,
    rotation: Rotation,
    scheduler: IntervalScheduler,
    presenter: P,
    tx: UnboundedSender<Signal>,
    rx: UnboundedReceiver<Signal>,
    /// Bumped each time a surface opens, so an auto-dismiss armed for
    /// an old surface cannot close a newer one.
    generation: u64,
}

impl<P: Presenter> ReminderCoordinator<P> {
    pub fn new(
        catalog: Catalog,
        rotation: Rotation,
        scheduler: IntervalScheduler,
        presenter: P,
        tx: UnboundedSender<Signal>,
        rx: UnboundedReceiver<Signal>,
    ) -> Self {
        Self {
            catalog,
            rotation,
            scheduler,
            presenter,
            tx,
            rx,
            generation: 0,
        }
    }

    pub fn scheduler(&self) -> &IntervalScheduler {
        &self.scheduler
    }

    pub fn rotation(&self) -> &Rotation {
        &self.rotation
    }

    /// Start the scheduler when configured to, and arm the one-shot
    /// startup reminder (fixed short delay, independent of the
    /// configured interval).
    pub fn startup(&mut self) {
        if self.scheduler.config().auto_start {
            self.scheduler.start();
        }
        let tx = self.tx.clone();
        let fire_at = tokio::time::Instant::now() + STARTUP_FIRE_DELAY;
        tokio::spawn(async move {
            tokio::time::sleep_until(fire_at).await;
            let _ = tx.send(Signal::Fire(Trigger::Startup));
        });
    }

    /// Drive the event loop until a [`Signal::Shutdown`] arrives or all
    /// senders are gone.
    pub async fn run(mut self) {
        self.startup();
        while let Some(signal) = self.rx.recv().await {
            if signal == Signal::Shutdown {
                break;
            }
            if let Some(event) = self.handle(signal) {
                log_event(&event);
            }
        }
        self.scheduler.stop();
        self.presenter.close();
    }

    /// Apply one signal. Returns the resulting telemetry event, if any.
    pub fn handle(&mut self, signal: Signal) -> Option<Event> {
        match signal {
            Signal::Fire(trigger) => Some(self.show_reminder(trigger)),
            Signal::DismissDeadline { generation } => {
                if generation == self.generation && self.presenter.is_open() {
                    self.presenter.close();
                    Some(Event::ReminderDismissed {
                        by_user: false,
                        at: Utc::now(),
                    })
                } else {
                    None
                }
            }
            Signal::Dismissed => Some(Event::ReminderDismissed {
                by_user: true,
                at: Utc::now(),
            }),
            Signal::Shutdown => None,
        }
    }

    /// Present today's thought, using the local calendar day as the
    /// rotation day key.
    pub fn show_reminder(&mut self, trigger: Trigger) -> Event {
        self.show_reminder_on(trigger, Local::now().date_naive())
    }

    fn show_reminder_on(&mut self, trigger: Trigger, today: NaiveDate) -> Event {
        if self.presenter.is_open() {
            debug!("surface already open, focusing");
            self.presenter.focus();
            return Event::ReminderRefocused {
                trigger,
                at: Utc::now(),
            };
        }

        let picked = self
            .rotation
            .pick_for_today(self.catalog.len(), today)
            .and_then(|index| self.catalog.get(index).map(|thought| (index, thought)));
        let Some((index, thought)) = picked else {
            warn!("no thought available");
            return Event::NoContent {
                trigger,
                at: Utc::now(),
            };
        };

        self.presenter.open(thought, self.scheduler.config());
        self.generation += 1;
        self.arm_auto_dismiss();

        Event::ReminderShown {
            thought_id: thought.id,
            index,
            trigger,
            at: Utc::now(),
        }
    }

    /// Arm the auto-dismiss deadline for the surface just opened.
    /// A duration of zero means the surface never auto-dismisses.
    fn arm_auto_dismiss(&self) {
        let duration_ms = self.scheduler.config().reminder_duration_ms;
        if duration_ms == 0 {
            return;
        }
        let tx = self.tx.clone();
        let generation = self.generation;
        let deadline =
            tokio::time::Instant::now() + std::time::Duration::from_millis(duration_ms);
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(Signal::DismissDeadline { generation });
        });
    }
}

fn log_event(event: &Event) {
    match event {
        Event::ReminderShown {
            thought_id,
            index,
            trigger,
            ..
        } => info!(thought_id, index, ?trigger, "reminder shown"),
        Event::ReminderRefocused { trigger, .. } => {
            debug!(?trigger, "refocused existing surface");
        }
        Event::NoContent { trigger, .. } => warn!(?trigger, "no thought available"),
        Event::ReminderDismissed { by_user, .. } => debug!(by_user, "reminder dismissed"),
        Event::SchedulerStarted { interval_ms, .. } => info!(interval_ms, "scheduler started"),
        Event::SchedulerStopped { .. } => info!("scheduler stopped"),
    }
}
