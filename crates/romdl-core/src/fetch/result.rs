//! Normalized outcome of one HTTP operation.

use std::path::{Path, PathBuf};

/// Status codes treated as failures by [`ContentResult::is_failure`].
pub const BAD_STATUSES: [u32; 5] = [502, 400, 504, 408, 500];

/// What a [`ContentResult`] carries: response text, or the downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Listing page body, error body, or the no-response placeholder.
    Text(String),
    /// Destination of a completed download.
    File(PathBuf),
}

/// Result of `fetch_listing` or `download`. Transport failures are folded in
/// here instead of being returned as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResult {
    pub url: String,
    pub status: u32,
    pub payload: Payload,
}

impl ContentResult {
    pub fn text(url: impl Into<String>, status: u32, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            payload: Payload::Text(body.into()),
        }
    }

    pub fn file(url: impl Into<String>, status: u32, path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            status,
            payload: Payload::File(path.into()),
        }
    }

    /// True iff the status is one of [`BAD_STATUSES`].
    pub fn is_failure(&self) -> bool {
        BAD_STATUSES.contains(&self.status)
    }

    pub fn is_success(&self) -> bool {
        !self.is_failure()
    }

    /// True for 2xx statuses.
    pub fn has_ok_status(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body text; empty for file payloads.
    pub fn text_body(&self) -> &str {
        match &self.payload {
            Payload::Text(s) => s,
            Payload::File(_) => "",
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        match &self.payload {
            Payload::File(p) => Some(p),
            Payload::Text(_) => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self.payload {
            Payload::Text(s) => Some(s),
            Payload::File(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_statuses_are_failures() {
        for status in BAD_STATUSES {
            let r = ContentResult::text("http://x/", status, "");
            assert!(r.is_failure(), "{status}");
            assert!(!r.is_success(), "{status}");
        }
    }

    #[test]
    fn other_statuses_are_successes() {
        for status in [200, 201, 204, 301, 401, 403, 404, 429, 501, 503] {
            let r = ContentResult::text("http://x/", status, "");
            assert!(r.is_success(), "{status}");
            assert!(!r.is_failure(), "{status}");
        }
    }

    #[test]
    fn ok_status_is_2xx_only() {
        assert!(ContentResult::text("u", 200, "").has_ok_status());
        assert!(ContentResult::text("u", 206, "").has_ok_status());
        assert!(!ContentResult::text("u", 404, "").has_ok_status());
        assert!(!ContentResult::text("u", 301, "").has_ok_status());
    }

    #[test]
    fn payload_accessors() {
        let t = ContentResult::text("u", 200, "body");
        assert_eq!(t.text_body(), "body");
        assert!(t.file_path().is_none());
        let f = ContentResult::file("u", 200, "/tmp/a.zip");
        assert_eq!(f.file_path(), Some(Path::new("/tmp/a.zip")));
        assert_eq!(f.text_body(), "");
        assert!(f.into_text().is_none());
    }
}
