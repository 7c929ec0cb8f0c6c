//! Retry loop: run a closure until success or the policy says stop.

use super::classify;
use super::error::AttemptError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs `f` until it succeeds or the retry policy says to stop, returning the
/// last error in the latter case. `f` receives the 1-based attempt number.
pub fn run_with_retry<T, F>(policy: &RetryPolicy, mut f: F) -> Result<T, AttemptError>
where
    F: FnMut(u32) -> Result<T, AttemptError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let class = classify::classify(&e);
                match policy.decide(attempt, class) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!(attempt, ?class, "attempt failed ({}); retrying in {:?}", e, d);
                        std::thread::sleep(d);
                        attempt += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            min_wait: Duration::from_millis(1),
            max_wait: Duration::from_millis(2),
        }
    }

    fn http(status: u32) -> AttemptError {
        AttemptError::Http {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn succeeds_on_third_attempt() {
        let mut calls = 0;
        let r = run_with_retry(&fast_policy(), |attempt| {
            calls += 1;
            if attempt < 3 {
                Err(http(502))
            } else {
                Ok(attempt)
            }
        });
        assert_eq!(r.unwrap(), 3);
        assert_eq!(calls, 3);
    }

    #[test]
    fn gives_up_after_max_attempts() {
        let mut calls = 0;
        let r: Result<(), _> = run_with_retry(&fast_policy(), |_| {
            calls += 1;
            Err(http(500))
        });
        assert!(matches!(r, Err(AttemptError::Http { status: 500, .. })));
        assert_eq!(calls, 3);
    }

    #[test]
    fn storage_error_is_not_retried() {
        let mut calls = 0;
        let r: Result<(), _> = run_with_retry(&fast_policy(), |_| {
            calls += 1;
            Err(AttemptError::Storage(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        });
        assert!(matches!(r, Err(AttemptError::Storage(_))));
        assert_eq!(calls, 1);
    }
}
