pub mod config;
pub mod faith;
pub mod history;
pub mod mode;
pub mod stats;

use bolchaal_core::{Config, Database, LessonTracker, ModeCatalog, ModeSelector, PcgSource};

pub type Tracker = LessonTracker<Database, PcgSource>;

/// Open the on-disk history with a selector built from the user's config.
pub fn open_tracker(config: &Config, seed: Option<u64>) -> Result<Tracker, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let selector = ModeSelector::new(PcgSource::from_seed_option(seed))
        .with_catalog(ModeCatalog::builtin())
        .with_config(config.rotation.clone());
    Ok(LessonTracker::new(db, selector))
}
