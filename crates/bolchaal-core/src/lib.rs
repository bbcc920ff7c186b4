//! # Bolchaal Core Library
//!
//! Lesson rotation for the Bolchaal Fiji Hindi course. Each session the
//! learner gets one of several lesson modes (phone call, flashcards, ...);
//! this crate decides which, based on what they did recently and how long
//! they have been learning. The CLI binary is a thin layer over the same
//! library.
//!
//! ## Architecture
//!
//! - **Mode catalog**: static table of modes and the week each one unlocks
//! - **History**: capped, append-only lesson log behind a [`HistoryStore`]
//! - **Rotation**: frequency, eligibility and weighted selection, with
//!   randomness injected through [`RandomSource`]
//! - **Storage**: SQLite lesson log and TOML configuration
//! - **Faith terms**: vocabulary substitution for lesson scripts
//!
//! ## Key Components
//!
//! - [`ModeSelector`]: picks the next lesson mode
//! - [`LessonTracker`]: loads history, asks the selector, records completions
//! - [`Database`]: SQLite-backed [`HistoryStore`]
//! - [`Config`]: Application configuration management

pub mod error;
pub mod faith_terms;
pub mod history;
pub mod mode;
pub mod rotation;
pub mod storage;
pub mod tracker;
pub mod week;

pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use faith_terms::{substitute, FaithTradition};
pub use history::{HistoryEntry, HistoryStore, MemoryHistoryStore, ModeHistory, HISTORY_CAPACITY};
pub use mode::{ModeCatalog, ModeDefinition, ModeId};
pub use rotation::{
    eligible_modes, frequency_report, recent_frequency, FrequencyReport, ModeSelector,
    PcgSource, RandomSource, RngSource, RotationConfig, ScriptedRandom,
};
pub use storage::{Config, Database};
pub use tracker::LessonTracker;
pub use week::{current_week, WeekNumber};
