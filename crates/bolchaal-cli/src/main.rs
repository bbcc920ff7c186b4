use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "bolchaal", version, about = "Bolchaal lesson rotation CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lesson modes and next-mode selection
    Mode {
        #[command(subcommand)]
        action: commands::mode::ModeAction,
    },
    /// Lesson history
    History {
        #[command(subcommand)]
        action: commands::history::HistoryAction,
    },
    /// Lesson statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Faith-aware vocabulary
    Faith {
        #[command(subcommand)]
        action: commands::faith::FaithAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    // stderr keeps stdout clean for JSON output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "bolchaal_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Mode { action } => commands::mode::run(action),
        Commands::History { action } => commands::history::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Faith { action } => commands::faith::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
