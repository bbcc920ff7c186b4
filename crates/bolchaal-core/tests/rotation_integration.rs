//! Integration tests for lesson rotation over the SQLite history.

use bolchaal_core::{
    Database, HistoryStore, LessonTracker, ModeCatalog, ModeId, ModeSelector, RngSource,
    ScriptedRandom, WeekNumber, HISTORY_CAPACITY,
};
use chrono::{Duration, Utc};

#[test]
fn test_three_months_of_lessons() {
    let start = Utc::now() - Duration::days(90);
    let mut tracker = LessonTracker::new(
        Database::open_memory().unwrap(),
        ModeSelector::new(RngSource::seeded(2024)),
    );

    let mut picked = Vec::new();
    for day in 0..90 {
        let now = start + Duration::days(day);
        let mode = tracker.next_mode(None, now).unwrap();
        let week = tracker.current_week(now).unwrap();
        assert!(
            ModeCatalog::builtin().is_unlocked(mode, week),
            "{mode} offered in {week}"
        );
        tracker.record_completion(mode, now).unwrap();
        picked.push(mode);
    }

    // Stored log is capped, first lesson is not.
    let history = tracker.history().unwrap();
    assert_eq!(history.len(), HISTORY_CAPACITY);
    assert_eq!(
        tracker.store().first_lesson_at().unwrap().unwrap().date_naive(),
        start.date_naive()
    );
    assert_eq!(tracker.current_week(Utc::now()).unwrap(), WeekNumber::new(13));

    // Never three in a row.
    assert!(picked.windows(3).all(|w| !(w[0] == w[1] && w[1] == w[2])));

    // Every mode eventually shows up once unlocked.
    for mode in ModeId::ALL {
        assert!(picked.contains(&mode), "{mode} never picked");
    }

    // The privileged mode holds a fair share overall.
    let phone = picked.iter().filter(|m| **m == ModeId::PhoneCall).count();
    assert!(phone as f64 / picked.len() as f64 > 0.2, "phone_call share {phone}/90");
}

#[test]
fn test_boost_after_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bolchaal.db");
    let now = Utc::now();

    {
        let mut db = Database::open_at(&path).unwrap();
        for i in 0..10 {
            let mode = if i % 2 == 0 { ModeId::Flashcard } else { ModeId::StepByStep };
            db.append(bolchaal_core::HistoryEntry::new(mode, now - Duration::days(20) + Duration::hours(i)))
                .unwrap();
        }
    }

    let mut tracker = LessonTracker::new(
        Database::open_at(&path).unwrap(),
        ModeSelector::new(ScriptedRandom::constant(0.0)),
    );
    assert_eq!(tracker.current_week(now).unwrap().get(), 3);
    assert_eq!(tracker.next_mode(None, now).unwrap(), ModeId::PhoneCall);
}
