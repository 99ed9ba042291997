//! Lifetime user statistics.
//!
//! `UserStats` is the only slice of state that survives process restarts.
//! It is default-initialized once and mutated only by the clock tick, break
//! completion, and the emergency override.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::metrics::{burnout_level, BurnoutLevel};

/// Upper clamp for the health score.
pub const HEALTH_SCORE_MAX: u32 = 100;

/// Persisted user statistics.
///
/// `#[serde(default)]` lets a partial or older stored blob merge over fresh
/// defaults instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    /// Consecutive breaks taken without an emergency override.
    pub break_streak: u32,
    /// Lifetime count of completed breaks.
    pub total_breaks_taken: u32,
    /// Lifetime count of emergency overrides.
    pub emergency_overrides_used: u32,
    /// Date key of the last override, for the once-daily gate.
    pub last_override_date: Option<String>,
    /// 0-100, clamped.
    pub health_score: u32,
    /// Derived from `health_score` and `today_work_seconds`.
    pub burnout_level: BurnoutLevel,
    /// Lifetime working seconds.
    pub total_work_seconds: u64,
    /// Working seconds today; resets on date rollover.
    pub today_work_seconds: u64,
    /// Date key of the last tick that accumulated work time.
    pub last_work_date: Option<String>,
}

impl Default for UserStats {
    fn default() -> Self {
        Self {
            break_streak: 0,
            total_breaks_taken: 0,
            emergency_overrides_used: 0,
            last_override_date: None,
            health_score: HEALTH_SCORE_MAX,
            burnout_level: BurnoutLevel::Low,
            total_work_seconds: 0,
            today_work_seconds: 0,
            last_work_date: None,
        }
    }
}

impl UserStats {
    /// Recompute the derived burnout level from the current score and hours.
    pub fn recompute_burnout(&mut self) {
        self.burnout_level = burnout_level(self.health_score, self.today_work_seconds);
    }
}

/// Local calendar-day key, `YYYY-MM-DD`.
pub fn today_key() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let stats = UserStats::default();
        assert_eq!(stats.health_score, 100);
        assert_eq!(stats.burnout_level, BurnoutLevel::Low);
        assert_eq!(stats.break_streak, 0);
        assert!(stats.last_override_date.is_none());
        assert!(stats.last_work_date.is_none());
    }

    #[test]
    fn partial_blob_merges_over_defaults() {
        let stats: UserStats = serde_json::from_str(r#"{"total_breaks_taken": 7}"#).unwrap();
        assert_eq!(stats.total_breaks_taken, 7);
        assert_eq!(stats.health_score, 100);
        assert_eq!(stats.burnout_level, BurnoutLevel::Low);
    }

    #[test]
    fn json_roundtrip() {
        let mut stats = UserStats::default();
        stats.break_streak = 4;
        stats.health_score = 55;
        stats.today_work_seconds = 7 * 3600;
        stats.last_override_date = Some("2026-08-20".into());
        stats.recompute_burnout();

        let raw = serde_json::to_string(&stats).unwrap();
        let parsed: UserStats = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, stats);
    }

    #[test]
    fn recompute_burnout_tracks_inputs() {
        let mut stats = UserStats::default();
        stats.health_score = 30;
        stats.today_work_seconds = 7 * 3600;
        stats.recompute_burnout();
        assert_eq!(stats.burnout_level, BurnoutLevel::High);
    }

    #[test]
    fn today_key_shape() {
        let key = today_key();
        assert_eq!(key.len(), 10);
        assert_eq!(key.as_bytes()[4], b'-');
        assert_eq!(key.as_bytes()[7], b'-');
    }
}
