use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::BurnoutLevel;
use crate::session::{LockMode, SessionPhase};

/// Every state change in the core produces an Event.
/// The presentation layer polls snapshots and renders from them; it never
/// keeps timers of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        duration_min: u32,
        break_frequency_min: u32,
        total_breaks: u32,
        at: DateTime<Utc>,
    },
    /// Sixty seconds of notice before the lockdown.
    WarningEntered {
        warning_countdown_secs: u32,
        at: DateTime<Utc>,
    },
    LockdownEntered {
        lock_countdown_secs: u32,
        at: DateTime<Utc>,
    },
    /// Lock countdown expired; the session now waits on an explicit
    /// `complete_break`.
    LockdownEnded {
        break_number: u32,
        at: DateTime<Utc>,
    },
    BreakCompleted {
        break_number: u32,
        break_streak: u32,
        health_score: u32,
        at: DateTime<Utc>,
    },
    LockModeChanged {
        lock_mode: LockMode,
        at: DateTime<Utc>,
    },
    /// The once-daily emergency override was spent.
    OverrideUsed {
        overrides_used: u32,
        health_score: u32,
        at: DateTime<Utc>,
    },
    SessionEnded {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: SessionPhase,
        lock_mode: LockMode,
        elapsed_secs: u64,
        next_break_in_secs: u32,
        warning_countdown_secs: u32,
        lock_countdown_secs: u32,
        current_break_number: u32,
        total_breaks: u32,
        break_streak: u32,
        health_score: u32,
        burnout_level: BurnoutLevel,
        can_override_today: bool,
        at: DateTime<Utc>,
    },
}
