//! Retry policy for binary downloads.
//!
//! An explicit bounded loop around a single attempt closure: each failure is
//! classified, and retryable failures sleep for a freshly drawn jittered
//! delay before the next attempt. Listing fetches are not retried.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, FailureClass};
pub use error::AttemptError;
pub use policy::{RetryDecision, RetryPolicy};
pub use run::run_with_retry;
