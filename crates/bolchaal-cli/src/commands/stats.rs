use clap::Subcommand;

use bolchaal_core::Config;

use super::open_tracker;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Share of each mode in the trailing window
    Frequency {
        /// Window size in lessons (defaults to rotation.window_size)
        #[arg(long)]
        window: Option<usize>,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tracker = open_tracker(&config, None)?;

    match action {
        StatsAction::Frequency { window } => {
            let window = window.unwrap_or(config.rotation.window_size);
            let report = tracker.frequency_report(window)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
