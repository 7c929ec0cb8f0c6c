//! Error taxonomy for everything above the transport layer.
//!
//! Transport failures inside `fetch_listing` / `download` never show up here;
//! they are normalized into a [`ContentResult`](crate::fetch::ContentResult).
//! Callers turn a failed `ContentResult` into [`RomdlError::Fetch`] or
//! [`RomdlError::Download`] themselves.

use thiserror::Error;

/// Errors surfaced by sources, the registry, and the orchestrator.
#[derive(Debug, Error)]
pub enum RomdlError {
    /// Listing page unreachable or returned an error status.
    #[error("failed to fetch listing {url}: HTTP {status}: {message}")]
    Fetch {
        url: String,
        status: u32,
        message: String,
    },

    /// Expected HTML structure is absent (table, row, anchor, attribute).
    #[error("listing parse error: {0}")]
    Parse(String),

    /// Binary download failed after exhausting retries.
    #[error("failed to download {url}: HTTP {status}: {message}")]
    Download {
        url: String,
        status: u32,
        message: String,
    },

    /// A source with the same key is already registered on the console.
    #[error("source already registered for {platform}: {url}")]
    DuplicateSource { platform: String, url: String },

    /// Unknown platform identifier, or a platform with no registered sources.
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// A candidate refers to a source that is not (or no longer) registered.
    #[error("no source {url} registered for {platform}")]
    SourceNotFound { platform: String, url: String },

    /// 1-based pick outside the candidate list.
    #[error("selection {index} is out of range (1..={count})")]
    InvalidSelection { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, RomdlError>;

impl RomdlError {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        RomdlError::Parse(msg.into())
    }
}
