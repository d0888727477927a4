//! Foreground reminder loop.
//!
//! Composition root for the daemon mode: constructs the catalog,
//! rotation state and scheduler, wires them to the coordinator over an
//! explicit signal channel, and drives the event loop on a
//! current-thread runtime until Ctrl-C.

use ponder_core::{
    storage, IntervalScheduler, Presenter, ReminderConfig, ReminderCoordinator, Rotation, Signal,
    Thought,
};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Presents thoughts on the terminal. "Open" lasts until dismissal so
/// the coordinator's single-surface rule is observable here too.
#[derive(Default)]
struct TerminalPresenter {
    open: bool,
}

impl Presenter for TerminalPresenter {
    fn open(&mut self, thought: &Thought, _config: &ReminderConfig) {
        self.open = true;
        println!();
        println!("  {}", thought.text);
        if !thought.translation.is_empty() {
            println!("  {}", thought.translation);
        }
        if !thought.source.is_empty() {
            println!("    -- {}, {}", thought.source, thought.reference);
        }
        println!();
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn focus(&mut self) {
        // A terminal has nothing to raise; the reminder is already
        // the newest output.
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let catalog = super::open_catalog()?;
        let rotation = Rotation::load(storage::state_path()?);
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = IntervalScheduler::new(storage::config_path()?, tx.clone());
        let coordinator = ReminderCoordinator::new(
            catalog,
            rotation,
            scheduler,
            TerminalPresenter::default(),
            tx.clone(),
            rx,
        );

        tokio::spawn(async move {
            let _ = tokio::signal::ctrl_c().await;
            let _ = tx.send(Signal::Shutdown);
        });

        info!("ponder running; press Ctrl-C to stop");
        coordinator.run().await;
        info!("ponder stopped");
        Ok(())
    })
}
