//! Break cadence and burnout metrics.
//!
//! Pure functions only -- no state. The state store fixes a session's break
//! cadence from these at session start and recomputes the burnout level after
//! every stats mutation.

use serde::{Deserialize, Serialize};

/// Derived health-risk classification from health score and daily hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnoutLevel {
    Low,
    Medium,
    High,
}

/// Minutes of work between mandatory breaks for a session of the given
/// length.
///
/// Step function, monotonic non-decreasing in duration. Total over all
/// inputs: a zero-minute duration falls in the first band.
pub fn break_frequency_min(duration_min: u32) -> u32 {
    if duration_min <= 30 {
        15
    } else if duration_min <= 60 {
        20
    } else if duration_min <= 120 {
        25
    } else {
        30
    }
}

/// Number of breaks a session of `duration_min` will enforce at the given
/// cadence.
///
/// May be zero for sessions shorter than one cadence interval; callers must
/// handle zero-break sessions. A zero frequency yields zero rather than
/// dividing by zero.
pub fn total_breaks(duration_min: u32, frequency_min: u32) -> u32 {
    if frequency_min == 0 {
        return 0;
    }
    duration_min / frequency_min
}

/// Burnout classification, evaluated in order.
///
/// Medium is reachable with a low health score when today's hours are low.
/// That is intentional threshold policy, not a shortcut.
pub fn burnout_level(health_score: u32, today_work_seconds: u64) -> BurnoutLevel {
    let hours_worked = today_work_seconds as f64 / 3600.0;

    if health_score >= 80 && hours_worked <= 4.0 {
        BurnoutLevel::Low
    } else if health_score >= 50 || hours_worked <= 6.0 {
        BurnoutLevel::Medium
    } else {
        BurnoutLevel::High
    }
}

/// True iff the once-daily emergency override is still available.
///
/// Date keys are local calendar days (`YYYY-MM-DD`); nothing finer than a
/// plain string comparison is attempted.
pub fn can_use_override_today(last_override_date: Option<&str>, today: &str) -> bool {
    match last_override_date {
        None => true,
        Some(date) => date != today,
    }
}
