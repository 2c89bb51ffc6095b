use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`SystemResolver`](super::SystemResolver).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Per-query deadline, usually derived from the session deadline.
    pub timeout_ms: u64,
    pub attempts: usize,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            attempts: 2,
        }
    }
}

impl ResolverOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// A zero timeout falls back to one second: queries are always bounded.
    pub fn timeout(&self) -> Duration {
        if self.timeout_ms == 0 {
            Duration::from_secs(1)
        } else {
            Duration::from_millis(self.timeout_ms)
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.max(1)
    }
}
