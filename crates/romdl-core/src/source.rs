//! A (platform, base URL) listing location.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::error::{Result, RomdlError};
use crate::fetch::ContentFetcher;
use crate::listing::Row;
use crate::platform::PlatformType;
use crate::url_model::resolve_link;

/// A listing page for one platform. Identity is `(platform, url)`; the last
/// fetched document is transient state and does not take part in equality.
#[derive(Debug, Clone)]
pub struct Source {
    platform: PlatformType,
    url: String,
    document: Option<String>,
}

impl Source {
    pub fn new(platform: PlatformType, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
            document: None,
        }
    }

    pub fn platform(&self) -> PlatformType {
        self.platform
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Raw text of the most recently fetched listing, parsable or not.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Fetches the listing page and parses it with the platform's format.
    pub fn fetch_and_parse(&mut self, fetcher: &ContentFetcher) -> Result<Vec<Row>> {
        let result = fetcher.fetch_listing(&self.url);
        if result.is_failure() || !result.has_ok_status() {
            return Err(RomdlError::Fetch {
                url: self.url.clone(),
                status: result.status,
                message: result.text_body().to_string(),
            });
        }
        let document = self.document.insert(result.into_text().unwrap_or_default());
        let rows = self.platform.listing_format().parse(document)?;
        tracing::debug!(source = %self.url, rows = rows.len(), "parsed source listing");
        Ok(rows)
    }

    /// Absolute download URL for a row of this source.
    pub fn resolve(&self, row: &Row) -> Result<String> {
        resolve_link(&self.url, &row.link).ok_or_else(|| RomdlError::Download {
            url: row.link.clone(),
            status: crate::fetch::status::REQUEST_FAILURE_STATUS,
            message: format!("cannot resolve link against {}", self.url),
        })
    }

    /// Where a row is saved: `<save_root>/<platform>/<file_name>`.
    pub fn destination(&self, save_root: &Path, row: &Row) -> PathBuf {
        save_root.join(self.platform.as_str()).join(&row.file_name)
    }

    /// Downloads a row unless its destination already exists.
    pub fn download_selection(
        &self,
        fetcher: &ContentFetcher,
        save_root: &Path,
        row: &Row,
    ) -> Result<PathBuf> {
        let dest = self.destination(save_root, row);
        if dest.exists() {
            tracing::info!(path = %dest.display(), "already downloaded");
            return Ok(dest);
        }

        let url = self.resolve(row)?;
        let result = fetcher.download(&url, &dest);
        if result.is_failure() || !result.has_ok_status() {
            return Err(RomdlError::Download {
                url,
                status: result.status,
                message: result.text_body().to_string(),
            });
        }
        Ok(result.file_path().map(Path::to_path_buf).unwrap_or(dest))
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.platform == other.platform && self.url == other.url
    }
}

impl Eq for Source {}

impl Hash for Source {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.platform.hash(state);
        self.url.hash(state);
    }
}
