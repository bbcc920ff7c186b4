use chrono::Utc;
use clap::Subcommand;

use bolchaal_core::{Config, HistoryStore, ModeId};

use super::open_tracker;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show recorded lessons, oldest first
    List,
    /// Record a completed lesson
    Record {
        /// Mode that was completed
        mode: String,
    },
    /// Delete all recorded lessons
    Clear,
    /// Show the learner's current week
    Week,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut tracker = open_tracker(&config, None)?;

    match action {
        HistoryAction::List => {
            let history = tracker.history()?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        HistoryAction::Record { mode } => {
            let mode: ModeId = mode.parse()?;
            let entry = tracker.record_completion(mode, Utc::now())?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        HistoryAction::Clear => {
            let mut store = tracker.into_store();
            store.clear()?;
            println!("history cleared");
        }
        HistoryAction::Week => {
            let week = tracker.current_week(Utc::now())?;
            println!("{}", week.get());
        }
    }
    Ok(())
}
