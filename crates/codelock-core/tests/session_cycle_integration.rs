//! Integration tests for the full work/break cycle.
//!
//! Drives a 60-minute session tick by tick through warning, lockdown, and
//! break completion, checking the exact boundary seconds of every phase
//! transition.

use codelock_core::{Event, LockMode, SessionPhase, StateStore};

const TODAY: &str = "2026-08-23";

fn drive(store: &mut StateStore, ticks: u32) -> Vec<Event> {
    (0..ticks)
        .filter_map(|_| store.tick_with_date(TODAY))
        .collect()
}

#[test]
fn full_cycle_boundaries() {
    let mut store = StateStore::in_memory();
    let started = store.start_session(60, None).unwrap();
    match started {
        Event::SessionStarted {
            break_frequency_min,
            total_breaks,
            ..
        } => {
            assert_eq!(break_frequency_min, 20);
            assert_eq!(total_breaks, 3);
        }
        other => panic!("expected SessionStarted, got {other:?}"),
    }

    // Working until the countdown lands on the 60-second warning lead:
    // 20 * 60 - 60 = 1140 ticks, warning fired exactly once.
    let events = drive(&mut store, 1140);
    let warnings = events
        .iter()
        .filter(|e| matches!(e, Event::WarningEntered { .. }))
        .count();
    assert_eq!(warnings, 1);
    assert_eq!(store.session().phase, SessionPhase::Warning);
    assert_eq!(store.session().warning_countdown_secs, 60);

    // Sixty seconds of warning, then lockdown with the full break length.
    let events = drive(&mut store, 60);
    assert!(matches!(
        events.last(),
        Some(Event::LockdownEntered {
            lock_countdown_secs: 180,
            ..
        })
    ));
    assert_eq!(store.session().phase, SessionPhase::Locked);
    assert_eq!(store.session().lock_countdown_secs, 180);
    assert_eq!(store.session().lock_mode, LockMode::Idle);

    // 180 seconds of lockdown, then break-complete.
    let events = drive(&mut store, 180);
    assert!(matches!(events.last(), Some(Event::LockdownEnded { .. })));
    assert_eq!(store.session().phase, SessionPhase::BreakComplete);

    // Break-complete only moves through the explicit action.
    assert!(store.tick_with_date(TODAY).is_none());
    let completed = store.complete_break().unwrap();
    match completed {
        Event::BreakCompleted {
            break_streak,
            health_score,
            ..
        } => {
            assert_eq!(break_streak, 1);
            // 100 + 5, clamped.
            assert_eq!(health_score, 100);
        }
        other => panic!("expected BreakCompleted, got {other:?}"),
    }
    assert_eq!(store.session().phase, SessionPhase::Working);
    assert_eq!(store.session().next_break_in_secs, 1200);
    assert_eq!(store.session().current_break_number, 1);
}

#[test]
fn warning_does_not_retrigger_after_manual_recovery() {
    let mut store = StateStore::in_memory();
    store.start_session(60, None);

    drive(&mut store, 1140);
    assert_eq!(store.session().phase, SessionPhase::Warning);

    // Override ends the warning and rearms the full interval; the stale
    // next_break_in value must not re-fire the edge.
    store.use_emergency_override_with_date(TODAY);
    assert_eq!(store.session().phase, SessionPhase::Working);
    assert_eq!(store.session().next_break_in_secs, 1200);

    let events = drive(&mut store, 600);
    assert!(events
        .iter()
        .all(|e| !matches!(e, Event::WarningEntered { .. })));
    assert_eq!(store.session().phase, SessionPhase::Working);
}

#[test]
fn work_time_accumulates_only_while_working() {
    let mut store = StateStore::in_memory();
    store.start_session(60, None);

    drive(&mut store, 1140); // working
    drive(&mut store, 60); // warning
    drive(&mut store, 180); // locked

    // Warning and lockdown seconds are not work seconds.
    assert_eq!(store.stats().total_work_seconds, 1140);
    assert_eq!(store.stats().today_work_seconds, 1140);
    assert_eq!(store.session().elapsed_secs, 1380);
}

#[test]
fn game_win_from_lockdown_counts_as_a_break() {
    let mut store = StateStore::in_memory();
    store.start_session(30, None);
    store.trigger_lockdown();
    store.set_lock_mode(LockMode::Game);

    assert!(store.game_win().is_some());
    assert_eq!(store.session().phase, SessionPhase::Working);
    assert_eq!(store.session().next_break_in_secs, 15 * 60);
    assert_eq!(store.stats().total_breaks_taken, 1);
}
