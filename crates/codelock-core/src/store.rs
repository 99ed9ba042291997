//! State store: exclusive owner of {config, session, stats}.
//!
//! Single-threaded cooperative model. The driver calls [`StateStore::tick`]
//! once per real second while a session is active; every transform completes
//! within the call that invoked it, so readers always observe a fully
//! transitioned snapshot, never a partially updated one.
//!
//! No action here fails. Meaningless actions (wrong phase) and the denied
//! emergency override return `None`. Persistence is best-effort: failures
//! are logged and the store keeps running in memory.

use chrono::{DateTime, Utc};

use crate::events::Event;
use crate::metrics;
use crate::session::clock::{self, Transition};
use crate::session::{LockMode, SessionConfig, SessionPhase, SessionState, WARNING_LEAD_SECS};
use crate::stats::{today_key, UserStats, HEALTH_SCORE_MAX};
use crate::storage::{Config, Database};

/// Health gained per completed break.
const BREAK_HEALTH_BONUS: u32 = 5;
/// Health lost per emergency override.
const OVERRIDE_HEALTH_PENALTY: u32 = 20;

pub struct StateStore {
    config: SessionConfig,
    session: SessionState,
    stats: UserStats,
    preferences: Config,
    storage: Option<Database>,
}

impl StateStore {
    /// Disk-backed store with preferences from `config.toml`.
    ///
    /// Never fails: a storage problem is logged and the store degrades to
    /// in-memory defaults for this process.
    pub fn open() -> Self {
        let storage = match Database::open() {
            Ok(db) => Some(db),
            Err(e) => {
                eprintln!("Warning: failed to open stats database: {e}");
                None
            }
        };
        Self::with_storage(storage, Config::load_or_default())
    }

    /// Store backed by an explicit database, with default preferences.
    pub fn with_database(db: Database) -> Self {
        Self::with_storage(Some(db), Config::default())
    }

    /// Store with no persistence at all (tests, previews).
    pub fn in_memory() -> Self {
        Self::with_storage(None, Config::default())
    }

    fn with_storage(storage: Option<Database>, preferences: Config) -> Self {
        // Persisted stats merge over defaults; config and session always
        // start fresh, so a restart lands in idle even mid-session.
        let stats = match storage.as_ref().map(Database::load_stats) {
            Some(Ok(Some(stats))) => stats,
            Some(Ok(None)) | None => UserStats::default(),
            Some(Err(e)) => {
                eprintln!("Warning: failed to load stats, using defaults: {e}");
                UserStats::default()
            }
        };
        Self {
            config: SessionConfig::default(),
            session: SessionState::default(),
            stats,
            preferences,
            storage,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn preferences(&self) -> &Config {
        &self.preferences
    }

    pub fn can_override_today(&self) -> bool {
        metrics::can_use_override_today(self.stats.last_override_date.as_deref(), &today_key())
    }

    /// Build a full state snapshot event for the presentation layer.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.session.phase,
            lock_mode: self.session.lock_mode,
            elapsed_secs: self.session.elapsed_secs,
            next_break_in_secs: self.session.next_break_in_secs,
            warning_countdown_secs: self.session.warning_countdown_secs,
            lock_countdown_secs: self.session.lock_countdown_secs,
            current_break_number: self.session.current_break_number,
            total_breaks: self.session.total_breaks,
            break_streak: self.stats.break_streak,
            health_score: self.stats.health_score,
            burnout_level: self.stats.burnout_level,
            can_override_today: self.can_override_today(),
            at: Utc::now(),
        }
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Start a work session, replacing config and session wholesale.
    ///
    /// Duration is unsigned by contract; a zero duration is tolerated and
    /// yields the shortest cadence with zero scheduled breaks.
    pub fn start_session(
        &mut self,
        duration_min: u32,
        deadline: Option<DateTime<Utc>>,
    ) -> Option<Event> {
        let frequency = metrics::break_frequency_min(duration_min);
        let total_breaks = metrics::total_breaks(duration_min, frequency);
        let break_duration = self.preferences.effective_break_duration_secs();

        self.config = SessionConfig {
            total_duration_min: duration_min,
            deadline,
            break_frequency_min: frequency,
            break_duration_secs: break_duration,
        };
        self.session = SessionState {
            phase: SessionPhase::Working,
            start_time: Some(Utc::now()),
            elapsed_secs: 0,
            current_break_number: 0,
            total_breaks,
            next_break_in_secs: self.config.break_interval_secs(),
            warning_countdown_secs: WARNING_LEAD_SECS,
            lock_countdown_secs: break_duration,
            lock_mode: LockMode::Idle,
        };

        Some(Event::SessionStarted {
            duration_min,
            break_frequency_min: frequency,
            total_breaks,
            at: Utc::now(),
        })
    }

    /// Advance the session by one second of wall time.
    ///
    /// Call at 1 Hz while the phase is not idle. Returns the transition
    /// event when this second crossed a phase boundary.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_with_date(&today_key())
    }

    /// Tick against an explicit date key. Exposed so tests can exercise the
    /// date rollover without waiting for midnight.
    pub fn tick_with_date(&mut self, today: &str) -> Option<Event> {
        if matches!(
            self.session.phase,
            SessionPhase::Idle | SessionPhase::BreakComplete
        ) {
            return None;
        }

        let transition = clock::advance(&self.config, &mut self.session, &mut self.stats, today);
        self.persist_stats();

        match transition {
            Some(Transition::WarningEntered) => Some(Event::WarningEntered {
                warning_countdown_secs: self.session.warning_countdown_secs,
                at: Utc::now(),
            }),
            Some(Transition::LockdownEntered) => Some(Event::LockdownEntered {
                lock_countdown_secs: self.session.lock_countdown_secs,
                at: Utc::now(),
            }),
            Some(Transition::LockdownEnded) => Some(Event::LockdownEnded {
                break_number: self.session.current_break_number + 1,
                at: Utc::now(),
            }),
            None => None,
        }
    }

    /// Complete the current break and return to work.
    ///
    /// Valid from locked (the mini-game win path) or break-complete; a
    /// silent no-op in any other phase.
    pub fn complete_break(&mut self) -> Option<Event> {
        if !matches!(
            self.session.phase,
            SessionPhase::Locked | SessionPhase::BreakComplete
        ) {
            return None;
        }

        self.stats.break_streak += 1;
        self.stats.total_breaks_taken += 1;
        self.stats.health_score =
            (self.stats.health_score + BREAK_HEALTH_BONUS).min(HEALTH_SCORE_MAX);
        self.stats.recompute_burnout();
        self.session.current_break_number += 1;
        clock::rearm_for_work(&self.config, &mut self.session);
        self.persist_stats();

        Some(Event::BreakCompleted {
            break_number: self.session.current_break_number,
            break_streak: self.stats.break_streak,
            health_score: self.stats.health_score,
            at: Utc::now(),
        })
    }

    /// Mini-game victory callback: ends the lockdown early, regardless of
    /// the remaining lock countdown.
    pub fn game_win(&mut self) -> Option<Event> {
        self.complete_break()
    }

    /// Spend the once-daily emergency override.
    ///
    /// Denied (silent no-op) when already used today or when no session is
    /// running. When granted, the session is forced back to working with
    /// fresh countdowns, the streak resets, and health takes the penalty.
    pub fn use_emergency_override(&mut self) -> Option<Event> {
        self.use_emergency_override_with_date(&today_key())
    }

    /// Override against an explicit date key (see [`Self::tick_with_date`]).
    pub fn use_emergency_override_with_date(&mut self, today: &str) -> Option<Event> {
        if self.session.phase == SessionPhase::Idle {
            return None;
        }
        if !metrics::can_use_override_today(self.stats.last_override_date.as_deref(), today) {
            return None;
        }

        self.stats.emergency_overrides_used += 1;
        self.stats.last_override_date = Some(today.to_string());
        self.stats.health_score = self.stats.health_score.saturating_sub(OVERRIDE_HEALTH_PENALTY);
        self.stats.break_streak = 0;
        self.stats.recompute_burnout();
        clock::rearm_for_work(&self.config, &mut self.session);
        self.persist_stats();

        Some(Event::OverrideUsed {
            overrides_used: self.stats.emergency_overrides_used,
            health_score: self.stats.health_score,
            at: Utc::now(),
        })
    }

    /// Force the warning phase, bypassing the countdown edge trigger.
    /// No-op while idle.
    pub fn trigger_warning(&mut self) -> Option<Event> {
        if self.session.phase == SessionPhase::Idle {
            return None;
        }
        self.session.phase = SessionPhase::Warning;
        self.session.warning_countdown_secs = WARNING_LEAD_SECS;
        Some(Event::WarningEntered {
            warning_countdown_secs: WARNING_LEAD_SECS,
            at: Utc::now(),
        })
    }

    /// Force an immediate lockdown, bypassing the warning. No-op while idle.
    pub fn trigger_lockdown(&mut self) -> Option<Event> {
        if self.session.phase == SessionPhase::Idle {
            return None;
        }
        self.session.phase = SessionPhase::Locked;
        self.session.lock_countdown_secs = self.config.break_duration_secs;
        self.session.lock_mode = LockMode::Idle;
        Some(Event::LockdownEntered {
            lock_countdown_secs: self.session.lock_countdown_secs,
            at: Utc::now(),
        })
    }

    /// Select the activity for the current lockdown. Silent no-op unless
    /// the session is locked.
    pub fn set_lock_mode(&mut self, mode: LockMode) -> Option<Event> {
        if self.session.phase != SessionPhase::Locked {
            return None;
        }
        self.session.lock_mode = mode;
        Some(Event::LockModeChanged {
            lock_mode: mode,
            at: Utc::now(),
        })
    }

    /// Unconditional reset of config and session to idle defaults.
    /// Stats are untouched. Always wins, regardless of phase.
    pub fn end_session(&mut self) -> Option<Event> {
        let elapsed_secs = self.session.elapsed_secs;
        self.config = SessionConfig::default();
        self.session = SessionState::default();
        Some(Event::SessionEnded {
            elapsed_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn persist_stats(&self) {
        if let Some(db) = &self.storage {
            if let Err(e) = db.save_stats(&self.stats) {
                eprintln!("Warning: failed to persist stats: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TODAY: &str = "2026-08-23";

    fn locked_store() -> StateStore {
        let mut store = StateStore::in_memory();
        store.start_session(60, None);
        store.trigger_lockdown();
        store
    }

    #[test]
    fn start_session_fixes_cadence() {
        let mut store = StateStore::in_memory();
        let event = store.start_session(60, None).unwrap();

        match event {
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
        assert_eq!(store.session().phase, SessionPhase::Working);
        assert_eq!(store.session().next_break_in_secs, 1200);
        assert!(store.session().start_time.is_some());
        assert_eq!(store.config().break_duration_secs, 180);
    }

    #[test]
    fn zero_duration_session_is_tolerated() {
        let mut store = StateStore::in_memory();
        store.start_session(0, None);
        assert_eq!(store.config().break_frequency_min, 15);
        assert_eq!(store.session().total_breaks, 0);
        assert_eq!(store.session().phase, SessionPhase::Working);
    }

    #[test]
    fn tick_in_idle_mutates_nothing() {
        let mut store = StateStore::in_memory();
        assert!(store.tick_with_date(TODAY).is_none());
        assert_eq!(store.session(), &SessionState::default());
        assert_eq!(store.stats(), &UserStats::default());
    }

    #[test]
    fn tick_in_break_complete_mutates_nothing() {
        let mut store = locked_store();
        for _ in 0..180 {
            store.tick_with_date(TODAY);
        }
        assert_eq!(store.session().phase, SessionPhase::BreakComplete);
        let session_before = store.session().clone();
        let stats_before = store.stats().clone();

        assert!(store.tick_with_date(TODAY).is_none());
        assert_eq!(store.session(), &session_before);
        assert_eq!(store.stats(), &stats_before);
    }

    #[test]
    fn complete_break_rewards_and_rearms() {
        let mut store = locked_store();
        let event = store.complete_break().unwrap();

        match event {
            Event::BreakCompleted {
                break_number,
                break_streak,
                health_score,
                ..
            } => {
                assert_eq!(break_number, 1);
                assert_eq!(break_streak, 1);
                // 100 + 5 clamps back to 100.
                assert_eq!(health_score, 100);
            }
            other => panic!("expected BreakCompleted, got {other:?}"),
        }
        assert_eq!(store.session().phase, SessionPhase::Working);
        assert_eq!(store.session().next_break_in_secs, 1200);
        assert_eq!(store.session().lock_mode, LockMode::Idle);
        assert_eq!(store.stats().total_breaks_taken, 1);
    }

    #[test]
    fn complete_break_outside_lock_is_a_no_op() {
        let mut store = StateStore::in_memory();
        assert!(store.complete_break().is_none());

        store.start_session(60, None);
        assert!(store.complete_break().is_none());
        assert_eq!(store.stats().break_streak, 0);
    }

    #[test]
    fn game_win_short_circuits_the_lockdown() {
        let mut store = locked_store();
        store.set_lock_mode(LockMode::Game);
        assert_eq!(store.session().lock_countdown_secs, 180);

        assert!(store.game_win().is_some());
        assert_eq!(store.session().phase, SessionPhase::Working);
        assert_eq!(store.stats().break_streak, 1);
    }

    #[test]
    fn set_lock_mode_only_while_locked() {
        let mut store = StateStore::in_memory();
        store.start_session(60, None);
        assert!(store.set_lock_mode(LockMode::Relax).is_none());
        assert_eq!(store.session().lock_mode, LockMode::Idle);

        store.trigger_lockdown();
        assert!(store.set_lock_mode(LockMode::Relax).is_some());
        assert_eq!(store.session().lock_mode, LockMode::Relax);
    }

    #[test]
    fn trigger_warning_bypasses_edge() {
        let mut store = StateStore::in_memory();
        assert!(store.trigger_warning().is_none()); // idle

        store.start_session(60, None);
        assert!(store.trigger_warning().is_some());
        assert_eq!(store.session().phase, SessionPhase::Warning);
        assert_eq!(store.session().warning_countdown_secs, 60);
    }

    #[test]
    fn trigger_lockdown_bypasses_warning() {
        let mut store = StateStore::in_memory();
        assert!(store.trigger_lockdown().is_none()); // idle

        store.start_session(60, None);
        assert!(store.trigger_lockdown().is_some());
        assert_eq!(store.session().phase, SessionPhase::Locked);
        assert_eq!(store.session().lock_countdown_secs, 180);
        assert_eq!(store.session().lock_mode, LockMode::Idle);
    }

    #[test]
    fn override_spends_the_daily_allowance_once() {
        let mut store = locked_store();

        let first = store.use_emergency_override_with_date(TODAY).unwrap();
        match first {
            Event::OverrideUsed {
                overrides_used,
                health_score,
                ..
            } => {
                assert_eq!(overrides_used, 1);
                assert_eq!(health_score, 80);
            }
            other => panic!("expected OverrideUsed, got {other:?}"),
        }
        assert_eq!(store.session().phase, SessionPhase::Working);
        assert_eq!(store.stats().break_streak, 0);
        assert_eq!(store.stats().last_override_date.as_deref(), Some(TODAY));

        // Same day: guaranteed no-op.
        store.trigger_lockdown();
        assert!(store.use_emergency_override_with_date(TODAY).is_none());
        assert_eq!(store.stats().emergency_overrides_used, 1);
        assert_eq!(store.stats().health_score, 80);

        // Next day the gate reopens.
        assert!(store
            .use_emergency_override_with_date("2026-08-24")
            .is_some());
        assert_eq!(store.stats().emergency_overrides_used, 2);
    }

    #[test]
    fn override_resets_streak_but_keeps_break_totals() {
        let mut store = locked_store();
        store.complete_break();
        store.trigger_lockdown();
        store.complete_break();
        assert_eq!(store.stats().break_streak, 2);

        store.trigger_lockdown();
        store.use_emergency_override_with_date(TODAY);
        assert_eq!(store.stats().break_streak, 0);
        assert_eq!(store.stats().total_breaks_taken, 2);
    }

    #[test]
    fn override_is_a_no_op_while_idle() {
        let mut store = StateStore::in_memory();
        assert!(store.use_emergency_override_with_date(TODAY).is_none());
        assert_eq!(store.stats().emergency_overrides_used, 0);
    }

    #[test]
    fn end_session_resets_session_not_stats() {
        let mut store = locked_store();
        store.complete_break();
        for _ in 0..10 {
            store.tick_with_date(TODAY);
        }
        assert!(store.stats().total_work_seconds > 0);

        let event = store.end_session().unwrap();
        assert!(matches!(event, Event::SessionEnded { elapsed_secs: 10, .. }));
        assert_eq!(store.session(), &SessionState::default());
        assert_eq!(store.config(), &SessionConfig::default());
        assert_eq!(store.stats().total_breaks_taken, 1);
        assert_eq!(store.stats().total_work_seconds, 10);
    }

    #[test]
    fn snapshot_reflects_current_state() {
        let mut store = StateStore::in_memory();
        store.start_session(90, None);

        match store.snapshot() {
            Event::StateSnapshot {
                phase,
                total_breaks,
                next_break_in_secs,
                can_override_today,
                ..
            } => {
                assert_eq!(phase, SessionPhase::Working);
                assert_eq!(total_breaks, 3); // 90 min at 25 min cadence
                assert_eq!(next_break_in_secs, 1500);
                assert!(can_override_today);
            }
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn corrupt_stored_stats_fall_back_to_defaults() {
        let db = Database::open_memory().unwrap();
        db.kv_set("user-stats", "{ definitely not json").unwrap();

        let store = StateStore::with_database(db);
        assert_eq!(store.stats(), &UserStats::default());
    }
}
