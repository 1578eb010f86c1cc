//! Per-user rate limiting of paint requests.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use hekiga_shared::time::{Clock, SystemClock};

use super::value_object::UserId;

/// Result of a cooldown attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    Accepted,
    Denied { remaining: Duration },
}

impl CooldownDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CooldownDecision::Accepted)
    }
}

/// Tracks the last accepted attempt of every user.
///
/// Entries are created on the first attempt and live for the whole process.
pub struct CooldownGate {
    cooldown: Duration,
    last_accepted: Mutex<HashMap<UserId, Instant>>,
    clock: Arc<dyn Clock>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self::with_clock(cooldown, Arc::new(SystemClock))
    }

    pub fn with_clock(cooldown: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            cooldown,
            last_accepted: Mutex::new(HashMap::new()),
            clock,
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Accept the attempt if the user's window has elapsed.
    ///
    /// A denied attempt leaves the recorded instant untouched, so the window is
    /// always measured from the last accepted attempt.
    pub fn attempt(&self, id: UserId) -> CooldownDecision {
        let mut last_accepted = self
            .last_accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = self.clock.now();

        match last_accepted.get(&id) {
            Some(last) => {
                let elapsed = now.saturating_duration_since(*last);
                if elapsed > self.cooldown {
                    last_accepted.insert(id, now);
                    CooldownDecision::Accepted
                } else {
                    CooldownDecision::Denied {
                        remaining: self.cooldown - elapsed,
                    }
                }
            }
            None => {
                last_accepted.insert(id, now);
                CooldownDecision::Accepted
            }
        }
    }

    /// Number of users seen so far
    pub fn tracked_users(&self) -> usize {
        self.last_accepted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}
