pub(crate) mod clock;
mod state;

pub use clock::Transition;
pub use state::{
    LockMode, SessionConfig, SessionPhase, SessionState, MIN_BREAK_DURATION_SECS,
    WARNING_LEAD_SECS,
};
