//! Reminder interval scheduler.
//!
//! Owns the persisted [`ReminderConfig`] and a repeating tokio timer.
//! Each period sends one [`Signal::Fire`] over the control channel --
//! fire-and-forget, so a slow consumer never delays the cadence. The
//! periodic timer reschedules relative to its own start with
//! [`MissedTickBehavior::Skip`]: a stalled consumer drops periods
//! instead of receiving a burst of back-to-back reminders.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running -> Stopped
//! ```
//!
//! `start` while running re-arms; `stop` while stopped is a no-op. One
//! already-sent fire may still be delivered after `stop()` returns --
//! the coordinator tolerates this by checking whether the surface is
//! already open.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::coordinator::Signal;
use crate::error::ConfigError;
use crate::events::{Event, Trigger};
use crate::storage::ReminderConfig;

/// Repeating reminder timer plus its persisted configuration.
pub struct IntervalScheduler {
    config: ReminderConfig,
    config_path: PathBuf,
    tx: UnboundedSender<Signal>,
    timer: Option<JoinHandle<()>>,
}

impl IntervalScheduler {
    /// Load the config (defaults on failure) and construct a stopped
    /// scheduler that fires into `tx`.
    pub fn new(config_path: PathBuf, tx: UnboundedSender<Signal>) -> Self {
        let config = ReminderConfig::load_or_default(&config_path);
        Self {
            config,
            config_path,
            tx,
            timer: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some() && self.config.enabled
    }

    /// Estimated next fire time: `now + interval` when running, `None`
    /// otherwise. An estimate only -- it does not account for time
    /// already elapsed within the current period.
    pub fn next_fire_time(&self) -> Option<DateTime<Utc>> {
        if !self.is_running() {
            return None;
        }
        Some(Utc::now() + chrono::Duration::milliseconds(self.config.interval_ms as i64))
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm the repeating timer. No-op while disabled; re-arms (cancels
    /// the previous timer) when already running.
    pub fn start(&mut self) -> Option<Event> {
        if !self.config.enabled {
            debug!("scheduler is disabled, not starting");
            return None;
        }
        self.stop();

        let interval_ms = self.config.interval_ms;
        info!(interval_ms, "starting scheduler");
        let tx = self.tx.clone();
        let period = Duration::from_millis(interval_ms);
        // Fix the first deadline now, not at the task's first poll.
        let first_fire = tokio::time::Instant::now() + period;
        self.timer = Some(tokio::spawn(async move {
            let mut timer = tokio::time::interval_at(first_fire, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                timer.tick().await;
                if tx.send(Signal::Fire(Trigger::Interval)).is_err() {
                    // Receiver gone; the loop is shutting down.
                    break;
                }
            }
        }));

        Some(Event::SchedulerStarted {
            interval_ms,
            at: Utc::now(),
        })
    }

    /// Cancel the timer. Idempotent; no further fires are sent after
    /// this returns (modulo one already-buffered signal).
    pub fn stop(&mut self) -> Option<Event> {
        let timer = self.timer.take()?;
        timer.abort();
        info!("scheduler stopped");
        Some(Event::SchedulerStopped { at: Utc::now() })
    }

    /// Send a fire immediately. Independent of the timer: it neither
    /// resets nor reschedules the pending period.
    pub fn trigger_now(&self) {
        debug!("manual trigger");
        let _ = self.tx.send(Signal::Fire(Trigger::Manual));
    }

    /// Persist a new interval. When running, re-arms so the next fire
    /// lands `new_ms` after this call rather than at the previously
    /// scheduled time.
    ///
    /// # Errors
    ///
    /// Returns an error when `new_ms` is zero.
    pub fn update_interval(&mut self, new_ms: u64) -> Result<(), ConfigError> {
        if new_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "interval_ms".to_string(),
                message: "must be positive".to_string(),
            });
        }
        self.config.interval_ms = new_ms;
        self.persist();
        if self.is_running() {
            self.start();
        }
        Ok(())
    }

    /// Flip the enabled flag, persist, then start or stop accordingly.
    /// Returns the new flag.
    pub fn toggle(&mut self) -> bool {
        self.config.enabled = !self.config.enabled;
        self.persist();
        if self.config.enabled {
            self.start();
        } else {
            self.stop();
        }
        self.config.enabled
    }

    /// Merge a single config field, persist, and re-arm if the interval
    /// changed while running.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn update(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let old_interval = self.config.interval_ms;
        self.config.set(key, value)?;
        self.persist();
        if self.config.interval_ms != old_interval && self.is_running() {
            self.start();
        }
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.config.save(&self.config_path) {
            warn!(path = %self.config_path.display(), "failed to persist config: {e}");
        }
    }
}

impl Drop for IntervalScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::time::Instant;

    // Advance the paused clock, then yield so woken timer tasks get
    // polled before the test inspects the channel.
    async fn advance(period: Duration) {
        tokio::time::advance(period).await;
        tokio::task::yield_now().await;
    }

    fn scheduler_with(
        config: ReminderConfig,
    ) -> (
        IntervalScheduler,
        mpsc::UnboundedReceiver<Signal>,
        tempfile::TempDir,
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        config.save(&path).unwrap();
        let (tx, rx) = mpsc::unbounded_channel();
        (IntervalScheduler::new(path, tx), rx, dir)
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_per_period() {
        let config = ReminderConfig {
            interval_ms: 1_000,
            ..Default::default()
        };
        let (mut scheduler, mut rx, _dir) = scheduler_with(config);
        scheduler.start();

        // Nothing before the first period elapses.
        advance(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        advance(Duration::from_millis(1)).await;
        assert_eq!(rx.try_recv(), Ok(Signal::Fire(Trigger::Interval)));

        advance(Duration::from_millis(1_000)).await;
        assert_eq!(rx.try_recv(), Ok(Signal::Fire(Trigger::Interval)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_scheduler_does_not_start() {
        let config = ReminderConfig {
            enabled: false,
            ..Default::default()
        };
        let (mut scheduler, mut rx, _dir) = scheduler_with(config);

        assert!(scheduler.start().is_none());
        assert!(!scheduler.is_running());
        advance(Duration::from_secs(3_600)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_silences_the_timer() {
        let config = ReminderConfig {
            interval_ms: 1_000,
            ..Default::default()
        };
        let (mut scheduler, mut rx, _dir) = scheduler_with(config);
        scheduler.start();

        assert!(scheduler.stop().is_some());
        assert!(scheduler.stop().is_none());
        assert!(!scheduler.is_running());

        advance(Duration::from_millis(5_000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn trigger_now_bypasses_the_timer() {
        let (scheduler, mut rx, _dir) = scheduler_with(ReminderConfig::default());
        // Not even started.
        scheduler.trigger_now();
        assert_eq!(rx.try_recv(), Ok(Signal::Fire(Trigger::Manual)));
    }

    #[tokio::test(start_paused = true)]
    async fn update_interval_rearms_from_the_update_point() {
        let config = ReminderConfig {
            interval_ms: 60_000,
            ..Default::default()
        };
        let (mut scheduler, mut rx, _dir) = scheduler_with(config);
        scheduler.start();

        advance(Duration::from_millis(10)).await;
        let updated_at = Instant::now();
        scheduler.update_interval(5_000).unwrap();

        // Auto-advancing recv: the next fire is one new period after
        // the update, not at the originally scheduled minute mark.
        let signal = rx.recv().await;
        assert_eq!(signal, Some(Signal::Fire(Trigger::Interval)));
        let waited = Instant::now() - updated_at;
        assert!(waited >= Duration::from_millis(5_000));
        assert!(waited < Duration::from_millis(60_000));
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_flips_persists_and_stops() {
        let (mut scheduler, _rx, dir) = scheduler_with(ReminderConfig::default());
        scheduler.start();
        assert!(scheduler.is_running());

        assert!(!scheduler.toggle());
        assert!(!scheduler.is_running());
        assert!(scheduler.toggle());
        assert!(scheduler.is_running());

        // Both flips were persisted.
        let on_disk = ReminderConfig::load(&dir.path().join("config.json")).unwrap();
        assert!(on_disk.enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn update_rearms_only_when_the_interval_changed() {
        let (mut scheduler, mut rx, _dir) = scheduler_with(ReminderConfig {
            interval_ms: 10_000,
            ..Default::default()
        });
        scheduler.start();
        advance(Duration::from_millis(9_000)).await;

        // Unrelated key: the pending period keeps its schedule.
        scheduler.update("theme", "dusk").unwrap();
        advance(Duration::from_millis(1_000)).await;
        assert_eq!(rx.try_recv(), Ok(Signal::Fire(Trigger::Interval)));

        // Interval change: the old schedule is discarded.
        scheduler.update("interval_ms", "30000").unwrap();
        advance(Duration::from_millis(10_000)).await;
        assert!(rx.try_recv().is_err());
        advance(Duration::from_millis(20_000)).await;
        assert_eq!(rx.try_recv(), Ok(Signal::Fire(Trigger::Interval)));
    }

    #[tokio::test(start_paused = true)]
    async fn next_fire_time_is_none_when_stopped() {
        let (mut scheduler, _rx, _dir) = scheduler_with(ReminderConfig::default());
        assert!(scheduler.next_fire_time().is_none());
        scheduler.start();
        assert!(scheduler.next_fire_time().is_some());
        scheduler.stop();
        assert!(scheduler.next_fire_time().is_none());
    }
}
