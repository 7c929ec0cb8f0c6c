//! Record and query types for the download history.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::platform::PlatformType;

pub type DownloadId = i64;

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Fields supplied when creating or updating a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDownload {
    pub title: String,
    pub platform: PlatformType,
    pub source_url: String,
    pub file_name: String,
    pub file_path: PathBuf,
}

/// A stored download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRecord {
    pub id: DownloadId,
    pub title: String,
    pub platform: PlatformType,
    pub source_url: String,
    pub file_name: String,
    pub file_path: PathBuf,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Page selection plus an optional title substring filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindQuery {
    pub page_index: i64,
    pub page_size: i64,
    pub filter: String,
}

impl Default for FindQuery {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            filter: String::new(),
        }
    }
}

impl FindQuery {
    /// Rejects negative page index or size.
    pub fn new(page_index: i64, page_size: i64, filter: impl Into<String>) -> Result<Self> {
        if page_index < 0 {
            bail!("page index must not be less than 0 (got {})", page_index);
        }
        if page_size < 0 {
            bail!("page size must not be less than 0 (got {})", page_size);
        }
        Ok(Self {
            page_index,
            page_size,
            filter: filter.into(),
        })
    }

    pub fn skip(&self) -> i64 {
        self.page_index.saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}
