//! Error produced by a single HTTP attempt.

use std::fmt;

/// Failure of one attempt (curl failure, HTTP error status, or local storage failure).
/// Kept separate from [`RomdlError`](crate::error::RomdlError) so it can be
/// classified for retries and normalized into a `ContentResult`.
#[derive(Debug)]
pub enum AttemptError {
    /// Curl reported an error (timeout, connection, etc.).
    Curl(curl::Error),
    /// Server answered with a non-2xx status.
    Http { status: u32, body: String },
    /// Creating directories or writing the destination failed. Not retried.
    Storage(std::io::Error),
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Curl(e) => write!(f, "{}", e),
            AttemptError::Http { status, .. } => write!(f, "HTTP {}", status),
            AttemptError::Storage(e) => write!(f, "storage: {}", e),
        }
    }
}

impl std::error::Error for AttemptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AttemptError::Curl(e) => Some(e),
            AttemptError::Storage(e) => Some(e),
            AttemptError::Http { .. } => None,
        }
    }
}
