use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ponder", version, about = "Ponder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's thought (advances rotation at most once per day)
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a random thought (does not affect rotation)
    Random {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rotation and scheduler statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Run the reminder loop in the foreground
    Run,
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Show { json } => commands::thought::show(json),
        Commands::Random { json } => commands::thought::random(json),
        Commands::Stats { json } => commands::stats::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Run => commands::run::run(),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
