//! Content Fetcher: cached listing GETs and retried binary downloads.
//!
//! Neither operation returns an error. Transport failures are normalized into
//! a [`ContentResult`] whose status is either the server's or a default for
//! the failure class (see [`status`]).

mod cache;
mod http;
mod result;
pub mod status;

pub use cache::{CacheEntry, ResponseCache};
pub use http::{temp_path, RequestOptions, DOWNLOAD_CHUNK_SIZE};
pub use result::{ContentResult, Payload, BAD_STATUSES};

use std::path::Path;
use std::time::Duration;

use crate::config::RomdlConfig;
use crate::retry::{run_with_retry, AttemptError, RetryPolicy};

/// Performs listing fetches through the response cache and downloads under
/// the retry policy. Blocking; one request at a time.
#[derive(Debug, Clone)]
pub struct ContentFetcher {
    request: RequestOptions,
    retry: RetryPolicy,
    cache: ResponseCache,
}

impl ContentFetcher {
    pub fn new(cache: ResponseCache, request: RequestOptions, retry: RetryPolicy) -> Self {
        Self {
            request,
            retry,
            cache,
        }
    }

    /// Fetcher using the configured cache location, expiry, timeout, user
    /// agent and retry settings.
    pub fn from_config(cfg: &RomdlConfig) -> Self {
        Self::new(
            ResponseCache::new(&cfg.cache_path, cfg.cache_expire_after()),
            RequestOptions {
                user_agent: cfg.user_agent.clone(),
                timeout: cfg.request_timeout(),
            },
            RetryPolicy::from(&cfg.retry_config()),
        )
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = timeout;
        self
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// GET a listing page, served from the cache while fresh. Single attempt.
    pub fn fetch_listing(&self, url: &str) -> ContentResult {
        if let Some(entry) = self.cache.get(url) {
            tracing::info!(url, "listing served from cache");
            return ContentResult::text(url, entry.status, entry.body);
        }

        tracing::debug!(url, "fetching listing");
        match http::get_text(url, &self.request) {
            Ok((status, body)) if (200..300).contains(&status) => {
                self.cache.put(url, status, &body);
                ContentResult::text(url, status, body)
            }
            Ok((status, body)) => {
                tracing::debug!(url, status, "listing returned error status");
                status::failure_result(url, &AttemptError::Http { status, body })
            }
            Err(e) => {
                tracing::debug!(url, "listing request failed: {}", e);
                status::failure_result(url, &e)
            }
        }
    }

    /// Streams `url` to `dest`, creating parent directories. Retried per the
    /// retry policy; the last failure is returned as a failure result.
    pub fn download(&self, url: &str, dest: &Path) -> ContentResult {
        let outcome = run_with_retry(&self.retry, |attempt| {
            tracing::debug!(url, attempt, dest = %dest.display(), "download attempt");
            http::get_to_file(url, dest, &self.request)
        });
        match outcome {
            Ok(status) => {
                tracing::info!(url, dest = %dest.display(), "download complete");
                ContentResult::file(url, status, dest)
            }
            Err(e) => {
                tracing::warn!(url, "download failed: {}", e);
                status::failure_result(url, &e)
            }
        }
    }
}
