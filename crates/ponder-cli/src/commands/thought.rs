use chrono::Local;
use ponder_core::{storage, Rotation, Thought};

/// Print today's thought, advancing the rotation if this is the first
/// pick of the day.
pub fn show(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::open_catalog()?;
    let mut rotation = Rotation::load(storage::state_path()?);
    let today = Local::now().date_naive();

    match rotation
        .pick_for_today(catalog.len(), today)
        .and_then(|index| catalog.get(index))
    {
        Some(thought) => print_thought(thought, json),
        None => {
            eprintln!("no thought available");
            std::process::exit(1);
        }
    }
    Ok(())
}

/// Print a random thought without touching rotation state.
pub fn random(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = super::open_catalog()?;
    let rotation = Rotation::load(storage::state_path()?);

    match rotation
        .pick_random(catalog.len())
        .and_then(|index| catalog.get(index))
    {
        Some(thought) => print_thought(thought, json),
        None => {
            eprintln!("no thought available");
            std::process::exit(1);
        }
    }
    Ok(())
}

fn print_thought(thought: &Thought, json: bool) {
    if json {
        match serde_json::to_string_pretty(thought) {
            Ok(out) => println!("{out}"),
            Err(e) => eprintln!("error: {e}"),
        }
        return;
    }

    println!("{}", thought.text);
    if !thought.translation.is_empty() {
        println!("  {}", thought.translation);
    }
    if !thought.source.is_empty() {
        if thought.reference.is_empty() {
            println!("    -- {}", thought.source);
        } else {
            println!("    -- {}, {}", thought.source, thought.reference);
        }
    }
}
