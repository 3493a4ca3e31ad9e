//! Backend call policy: how long to wait and how often to retry.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound on a single backend call
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of retries after the first failed attempt
pub const DEFAULT_MAX_RETRIES: usize = 1;

/// Every backend call is bounded by `timeout`. A failed or timed-out attempt
/// is retried up to `max_retries` times before the caller degrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPolicy {
    pub timeout: Duration,
    pub max_retries: usize,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CALL_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl CallPolicy {
    /// Creates a policy with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Duration::from_secs(seconds),
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Total attempts made before giving up
    pub fn attempts(&self) -> usize {
        self.max_retries + 1
    }
}
