//! Classify curl errors and attempt failures into failure classes.

use super::error::AttemptError;

/// Coarse failure class; drives both retry decisions and the default status
/// code used when no HTTP response is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Connect or read timed out.
    Timeout,
    /// Network-level failure (refused, reset, DNS, empty reply).
    Connection,
    /// Any other request failure (bad URL, protocol error, ...).
    Request,
    /// Server answered with this non-2xx status.
    Http(u32),
    /// Local filesystem failure.
    Storage,
}

impl FailureClass {
    /// Whether another attempt may succeed.
    pub fn is_retryable(self) -> bool {
        !matches!(self, FailureClass::Storage)
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureClass {
    if e.is_operation_timedout() {
        return FailureClass::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return FailureClass::Connection;
    }
    FailureClass::Request
}

/// Classify an attempt error.
pub fn classify(e: &AttemptError) -> FailureClass {
    match e {
        AttemptError::Curl(ce) => classify_curl_error(ce),
        AttemptError::Http { status, .. } => FailureClass::Http(*status),
        AttemptError::Storage(_) => FailureClass::Storage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_statuses_are_retryable() {
        let e = AttemptError::Http {
            status: 502,
            body: String::new(),
        };
        assert_eq!(classify(&e), FailureClass::Http(502));
        assert!(classify(&e).is_retryable());
    }

    #[test]
    fn storage_is_not_retryable() {
        let e = AttemptError::Storage(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(classify(&e), FailureClass::Storage);
        assert!(!classify(&e).is_retryable());
    }

    #[test]
    fn curl_codes_map_to_classes() {
        // CURLE_OPERATION_TIMEDOUT = 28, CURLE_COULDNT_CONNECT = 7, CURLE_URL_MALFORMAT = 3
        assert_eq!(
            classify_curl_error(&curl::Error::new(28)),
            FailureClass::Timeout
        );
        assert_eq!(
            classify_curl_error(&curl::Error::new(7)),
            FailureClass::Connection
        );
        assert_eq!(
            classify_curl_error(&curl::Error::new(3)),
            FailureClass::Request
        );
    }
}
