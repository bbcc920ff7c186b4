use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;

use bolchaal_core::{Config, ModeCatalog, ModeId, WeekNumber};

use super::open_tracker;

#[derive(Subcommand)]
pub enum ModeAction {
    /// List lesson modes and whether they are unlocked
    List {
        /// Week to check against (defaults to the learner's current week)
        #[arg(long)]
        week: Option<u32>,
    },
    /// Recommend the next lesson mode
    Next {
        /// Mode the learner asked for (e.g. "flashcard", "phone_call")
        #[arg(long)]
        preferred: Option<String>,
        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
        /// Record the recommended mode as a completed lesson
        #[arg(long)]
        record: bool,
    },
}

#[derive(Serialize)]
struct ModeRow<'a> {
    id: ModeId,
    name: &'a str,
    unlock_week: u32,
    unlocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_frequency: Option<f64>,
}

#[derive(Serialize)]
struct Recommendation {
    mode: ModeId,
    week: WeekNumber,
    recorded: bool,
}

pub fn run(action: ModeAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();

    match action {
        ModeAction::List { week } => {
            let week = match week {
                Some(n) => WeekNumber::new(n),
                None => open_tracker(&config, None)?.current_week(Utc::now())?,
            };
            let catalog = ModeCatalog::builtin();
            let rows: Vec<ModeRow> = catalog
                .modes()
                .iter()
                .map(|def| ModeRow {
                    id: def.id,
                    name: &def.name,
                    unlock_week: def.unlock_week,
                    unlocked: def.is_unlocked(week),
                    min_frequency: def.min_frequency,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        ModeAction::Next {
            preferred,
            seed,
            record,
        } => {
            let preferred = match preferred {
                Some(name) => Some(name.parse::<ModeId>()?),
                None => config.learner.preferred_mode,
            };
            let mut tracker = open_tracker(&config, seed)?;
            let now = Utc::now();
            let mode = tracker.next_mode(preferred, now)?;
            if record {
                tracker.record_completion(mode, now)?;
            }
            let week = tracker.current_week(now)?;
            let out = Recommendation {
                mode,
                week,
                recorded: record,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
