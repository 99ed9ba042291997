//! Rotating status messages for the presentation layer.
//!
//! The picker is an explicit stateful object constructed and owned by the
//! presentation layer -- there is no process-wide randomizer. A picked
//! message does not repeat until every message in the list has been shown
//! once, after which the used set resets.

use rand::Rng;

pub const BREAK_MESSAGES: &[&str] = &[
    "Your code can wait. Your wrists cannot.",
    "Even React needs to re-render. So do you.",
    "Debugging your health is not optional.",
    "Your future self is thanking you right now.",
    "Coffee break? More like code break.",
    "Rest is not lazy. It's strategic.",
    "Your keyboard will still be there. Promise.",
    "Burnout is a bug. This is the hotfix.",
    "Step away. The semicolons will survive.",
    "Your brain needs garbage collection too.",
];

pub const WARNING_MESSAGES: &[&str] = &[
    "Break incoming in 60 seconds...",
    "Heads up! Break time approaching...",
    "60 seconds until mandatory rest...",
    "Your brain requested a break...",
];

pub const LOCKDOWN_MESSAGES: &[&str] = &[
    "LOCKDOWN ACTIVE - Time to rest",
    "Screen locked. Health unlocked.",
    "No escape. Only rest.",
];

/// Non-repeating random message selection over a fixed list.
#[derive(Debug, Clone)]
pub struct MessagePicker {
    messages: &'static [&'static str],
    used: Vec<usize>,
}

impl MessagePicker {
    pub fn new(messages: &'static [&'static str]) -> Self {
        Self {
            messages,
            used: Vec::new(),
        }
    }

    /// Pick the next message using the thread-local RNG.
    pub fn pick(&mut self) -> &'static str {
        self.pick_with(&mut rand::thread_rng())
    }

    /// Pick the next message with an explicit RNG (deterministic in tests).
    pub fn pick_with<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        if self.messages.is_empty() {
            return "";
        }
        if self.used.len() >= self.messages.len() {
            self.used.clear();
        }

        let mut index;
        loop {
            index = rng.gen_range(0..self.messages.len());
            if !self.used.contains(&index) {
                break;
            }
        }

        self.used.push(index);
        self.messages[index]
    }
}
