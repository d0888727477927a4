use ponder_core::{storage, ReminderConfig, Rotation};

/// Print rotation statistics and the scheduler configuration summary.
pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::open_catalog()?;
    let rotation = Rotation::load(storage::state_path()?);
    let config = ReminderConfig::load_or_default(&storage::config_path()?);
    let stats = rotation.stats(catalog.len());

    if json {
        let out = serde_json::json!({
            "total_thoughts": stats.total_thoughts,
            "total_shown": stats.total_shown,
            "current_streak": stats.current_streak,
            "enabled": config.enabled,
            "interval_ms": config.interval_ms,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Thoughts available: {}", stats.total_thoughts);
    println!("Thoughts shown:     {}", stats.total_shown);
    println!("Current streak:     {} days", stats.current_streak);
    println!(
        "Scheduler:          {}",
        if config.enabled { "enabled" } else { "disabled" }
    );
    println!(
        "Reminder interval:  {} minutes",
        config.interval_ms / 1000 / 60
    );
    Ok(())
}
