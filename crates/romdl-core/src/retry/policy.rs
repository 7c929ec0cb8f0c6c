use std::time::Duration;

use rand::Rng;

use super::classify::FailureClass;
use crate::config::RetryConfig;

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Do not retry this error.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded retry with a uniformly random wait between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    /// Lower bound of the wait between attempts.
    pub min_wait: Duration,
    /// Upper bound of the wait between attempts.
    pub max_wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(2),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        let defaults = Self::default();
        let min_wait = wait_from_secs(cfg.min_wait_secs).unwrap_or(defaults.min_wait);
        let max_wait = wait_from_secs(cfg.max_wait_secs).unwrap_or(defaults.max_wait);
        Self {
            max_attempts: cfg.max_attempts.max(1),
            min_wait,
            max_wait: max_wait.max(min_wait),
        }
    }
}

/// Negative waits clamp to zero; NaN, infinite or overflowing values give `None`.
fn wait_from_secs(secs: f64) -> Option<Duration> {
    if secs.is_nan() {
        return None;
    }
    Duration::try_from_secs_f64(secs.max(0.0)).ok()
}

impl RetryPolicy {
    /// Decide what to do after attempt number `attempt` (1-based) failed.
    pub fn decide(&self, attempt: u32, class: FailureClass) -> RetryDecision {
        if attempt >= self.max_attempts || !class.is_retryable() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.jittered_wait())
    }

    /// Draws a wait uniformly from `[min_wait, max_wait]`.
    fn jittered_wait(&self) -> Duration {
        if self.max_wait <= self.min_wait {
            return self.min_wait;
        }
        let lo = self.min_wait.as_nanos() as u64;
        let hi = self.max_wait.as_nanos() as u64;
        Duration::from_nanos(rand::thread_rng().gen_range(lo..=hi))
    }
}
