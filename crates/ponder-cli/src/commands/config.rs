use clap::Subcommand;
use ponder_core::{storage, ReminderConfig};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "interval_ms", "enabled")
        key: String,
    },
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let path = storage::config_path()?;
    match action {
        ConfigAction::Get { key } => {
            let config = ReminderConfig::load_or_default(&path);
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            // A running `ponder run` picks the change up on restart.
            let mut config = ReminderConfig::load_or_default(&path);
            config.set(&key, &value)?;
            config.save(&path)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = ReminderConfig::load_or_default(&path);
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            let config = ReminderConfig::default();
            config.save(&path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
