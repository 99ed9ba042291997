//! Session configuration and per-tick session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds of advance notice before a lockdown.
pub const WARNING_LEAD_SECS: u32 = 60;

/// Minimum enforced break length in seconds.
pub const MIN_BREAK_DURATION_SECS: u32 = 180;

/// Stage of the work/break cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    Idle,
    Working,
    Warning,
    Locked,
    BreakComplete,
}

/// Activity selected during a mandatory break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LockMode {
    Idle,
    Game,
    Relax,
}

/// Immutable per-session configuration.
///
/// Replaced wholesale at session start, discarded at session end. Never
/// persisted -- a process restart always returns to idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub total_duration_min: u32,
    pub deadline: Option<DateTime<Utc>>,
    /// Minutes between mandatory breaks, fixed for the session.
    pub break_frequency_min: u32,
    /// Enforced break length in seconds, floored at 180.
    pub break_duration_secs: u32,
}

impl SessionConfig {
    /// Seconds of work between mandatory breaks.
    pub fn break_interval_secs(&self) -> u32 {
        self.break_frequency_min.saturating_mul(60)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            total_duration_min: 60,
            deadline: None,
            break_frequency_min: 25,
            break_duration_secs: MIN_BREAK_DURATION_SECS,
        }
    }
}

/// Session state, mutated once per clock tick.
///
/// Exactly one of `next_break_in_secs`, `warning_countdown_secs`, and
/// `lock_countdown_secs` is live per phase; the others hold stale values
/// until the next phase entry resets them. Countdowns are unsigned and
/// floored at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    pub start_time: Option<DateTime<Utc>>,
    /// Seconds since session start.
    pub elapsed_secs: u64,
    /// Completed breaks this session.
    pub current_break_number: u32,
    /// Fixed at session start from duration and cadence.
    pub total_breaks: u32,
    /// Seconds until the next warning trigger. Live while working.
    pub next_break_in_secs: u32,
    /// Live while in warning.
    pub warning_countdown_secs: u32,
    /// Live while locked.
    pub lock_countdown_secs: u32,
    /// Only meaningful while locked.
    pub lock_mode: LockMode,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            start_time: None,
            elapsed_secs: 0,
            current_break_number: 0,
            total_breaks: 0,
            next_break_in_secs: 0,
            warning_countdown_secs: WARNING_LEAD_SECS,
            lock_countdown_secs: MIN_BREAK_DURATION_SECS,
            lock_mode: LockMode::Idle,
        }
    }
}
