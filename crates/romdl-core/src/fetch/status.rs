//! Default statuses for failures that carry no HTTP response.

use super::result::ContentResult;
use crate::retry::{classify, AttemptError, FailureClass};

/// Body used when a failure has no response text.
pub const NO_RESPONSE_TEXT: &str = "No response text available";

pub const CONNECTION_FAILURE_STATUS: u32 = 502;
pub const TIMEOUT_STATUS: u32 = 504;
pub const REQUEST_FAILURE_STATUS: u32 = 400;
pub const STORAGE_FAILURE_STATUS: u32 = 500;

/// Status code reported for a failure class.
pub fn default_status(class: FailureClass) -> u32 {
    match class {
        FailureClass::Timeout => TIMEOUT_STATUS,
        FailureClass::Connection => CONNECTION_FAILURE_STATUS,
        FailureClass::Request => REQUEST_FAILURE_STATUS,
        FailureClass::Http(status) => status,
        FailureClass::Storage => STORAGE_FAILURE_STATUS,
    }
}

/// Folds an attempt error into a text `ContentResult`.
pub fn failure_result(url: &str, err: &AttemptError) -> ContentResult {
    let status = default_status(classify(err));
    let body = match err {
        AttemptError::Http { body, .. } if !body.trim().is_empty() => body.clone(),
        _ => NO_RESPONSE_TEXT.to_string(),
    };
    ContentResult::text(url, status, body)
}
