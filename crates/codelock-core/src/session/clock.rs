//! Per-second session clock.
//!
//! One call to [`advance`] is one elapsed real-time second. All countdown
//! arithmetic and phase transitions live here as pure transforms over the
//! session and stats values; the state store owns the values and applies
//! transforms in a fixed order within one tick. The clock is the sole source
//! of truth for every countdown -- the presentation layer must never run a
//! parallel timer.

use super::state::{LockMode, SessionConfig, SessionPhase, SessionState, WARNING_LEAD_SECS};
use crate::stats::UserStats;

/// Phase transition produced by a single clock step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WarningEntered,
    LockdownEntered,
    LockdownEnded,
}

/// Advance the session by one second.
///
/// No-op when the phase is idle or break-complete; those phases only move
/// through explicit actions. Transition order within a tick:
///
/// 1. elapsed time and (while working) work-second accounting
/// 2. working -> warning on the `next_break_in == 60` edge
/// 3. warning countdown, warning -> locked at zero
/// 4. lock countdown, locked -> break-complete at zero
///
/// Self-loops key off the pre-tick phase, so the tick that enters a phase
/// never also decrements the countdown it just armed.
pub fn advance(
    config: &SessionConfig,
    session: &mut SessionState,
    stats: &mut UserStats,
    today: &str,
) -> Option<Transition> {
    if matches!(
        session.phase,
        SessionPhase::Idle | SessionPhase::BreakComplete
    ) {
        return None;
    }

    let previous_phase = session.phase;
    session.elapsed_secs += 1;

    // Work time accumulates only while actually working. On a date rollover
    // today's counter restarts at 1, not 0: this tick's second belongs to the
    // new day.
    let is_new_day = stats.last_work_date.as_deref() != Some(today);
    if previous_phase == SessionPhase::Working {
        stats.total_work_seconds += 1;
        stats.today_work_seconds = if is_new_day {
            1
        } else {
            stats.today_work_seconds + 1
        };
    }
    stats.last_work_date = Some(today.to_string());

    let mut transition = None;

    if previous_phase == SessionPhase::Working {
        session.next_break_in_secs = session.next_break_in_secs.saturating_sub(1);
        // Edge-triggered: fires exactly once per breakpoint, when the
        // countdown lands on the warning lead.
        if session.next_break_in_secs == WARNING_LEAD_SECS {
            session.phase = SessionPhase::Warning;
            session.warning_countdown_secs = WARNING_LEAD_SECS;
            transition = Some(Transition::WarningEntered);
        }
    }

    if previous_phase == SessionPhase::Warning {
        session.warning_countdown_secs = session.warning_countdown_secs.saturating_sub(1);
        if session.warning_countdown_secs == 0 {
            session.phase = SessionPhase::Locked;
            session.lock_countdown_secs = config.break_duration_secs;
            session.lock_mode = LockMode::Idle;
            transition = Some(Transition::LockdownEntered);
        }
    }

    if previous_phase == SessionPhase::Locked {
        session.lock_countdown_secs = session.lock_countdown_secs.saturating_sub(1);
        if session.lock_countdown_secs == 0 {
            session.phase = SessionPhase::BreakComplete;
            transition = Some(Transition::LockdownEnded);
        }
    }

    transition
}

/// Rearm the session for the next work interval.
///
/// Shared by break completion and the emergency override: fresh break
/// countdown, warning lead, lock duration, lock mode back to idle.
pub fn rearm_for_work(config: &SessionConfig, session: &mut SessionState) {
    session.phase = SessionPhase::Working;
    session.next_break_in_secs = config.break_interval_secs();
    session.warning_countdown_secs = WARNING_LEAD_SECS;
    session.lock_countdown_secs = config.break_duration_secs;
    session.lock_mode = LockMode::Idle;
}
