//! Retry bookkeeping and the check verdict.

use super::config::RetryPolicy;
use serde::Serialize;
use std::time::Duration;

/// Attempt counter for one check. Never outlives the check that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryState {
    /// Failed attempts so far
    attempt: u32,
    max_attempts: u32,
    delay: Duration,
}

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the given delay, then try again
    RetryAfter(Duration),
    /// Budget spent; the target is down
    Exhausted,
}

impl RetryState {
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            attempt: 0,
            max_attempts: policy.max_attempts.max(1),
            delay: policy.delay,
        }
    }

    /// Failed attempts recorded so far.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Record a failure and decide whether another attempt is allowed.
    pub fn record_failure(&mut self) -> RetryDecision {
        self.attempt += 1;
        if self.attempt >= self.max_attempts {
            RetryDecision::Exhausted
        } else {
            RetryDecision::RetryAfter(self.delay)
        }
    }
}

/// Binary outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckVerdict {
    pub up: bool,
    /// Attempts performed, including the final one
    pub attempts: u32,
    /// Human-readable cause, for logs only
    pub reason: String,
}

impl CheckVerdict {
    pub fn up(attempts: u32) -> Self {
        Self {
            up: true,
            attempts,
            reason: "ok".to_string(),
        }
    }

    pub fn down(attempts: u32, reason: impl Into<String>) -> Self {
        Self {
            up: false,
            attempts,
            reason: reason.into(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.up
    }
}
