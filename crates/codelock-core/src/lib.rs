//! # CodeLock Core Library
//!
//! Core business logic for CodeLock, a break-enforcement timer that locks
//! the screen for mandatory rest during timed work sessions and tracks user
//! health and burnout across sessions. The presentation layer (GUI, TUI, or
//! anything else) is a thin shell over this crate: it drives the clock at
//! 1 Hz and renders from snapshots.
//!
//! ## Architecture
//!
//! - **Session Clock**: a tick-driven state machine
//!   (idle -> working -> warning -> locked -> break-complete -> working);
//!   the caller invokes `tick()` once per real second while a session runs
//! - **Metrics Engine**: pure functions deriving break cadence, total
//!   breaks, and burnout level
//! - **State Store**: exclusive owner of {config, session, stats}; exposes
//!   the action set and persists only the stats slice
//! - **Storage**: SQLite stats persistence and TOML-based preferences
//!
//! The core never spawns threads and no action fails: wrong-phase actions
//! and the denied once-daily override are silent no-ops, and persistence
//! failures degrade to in-memory operation.
//!
//! ## Key Components
//!
//! - [`StateStore`]: action dispatch and snapshots
//! - [`UserStats`]: the persisted health/burnout record
//! - [`MessagePicker`]: non-repeating status messages for the presentation
//!   layer

pub mod error;
pub mod events;
pub mod messages;
pub mod metrics;
pub mod session;
pub mod stats;
pub mod storage;
pub mod store;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use messages::{MessagePicker, BREAK_MESSAGES, LOCKDOWN_MESSAGES, WARNING_MESSAGES};
pub use metrics::BurnoutLevel;
pub use session::{
    LockMode, SessionConfig, SessionPhase, SessionState, MIN_BREAK_DURATION_SECS,
    WARNING_LEAD_SECS,
};
pub use stats::UserStats;
pub use storage::{Config, Database};
pub use store::StateStore;
