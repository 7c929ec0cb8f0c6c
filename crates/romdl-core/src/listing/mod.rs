//! Listing-page parser: HTML directory tables to [`Row`]s.
//!
//! A listing page holds a single `<table id="list">`. Its first two rows are
//! the column header and the parent-directory link; every following row is
//! one downloadable entry.

mod row;

pub use row::Row;

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::error::{Result, RomdlError};

/// Number of leading table rows that are not entries (header, parent directory).
pub const SKIPPED_LEADING_ROWS: usize = 2;

static LIST_TABLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table#list").expect("static selector"));
static TABLE_ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("static selector"));

/// Parser strategy for a platform's listing pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
    /// Web-server directory index rendered as `table#list` with a `td.link` column.
    DirectoryIndex,
}

impl ListingFormat {
    pub fn parse(self, document: &str) -> Result<Vec<Row>> {
        match self {
            ListingFormat::DirectoryIndex => parse(document),
        }
    }
}

/// Parses a directory-index document into rows, in table order.
///
/// Fails if the listing table is missing. Rows that do not carry a
/// title/link pair are dropped.
pub fn parse(document: &str) -> Result<Vec<Row>> {
    let html = Html::parse_document(document);
    let table = html
        .select(&LIST_TABLE_SELECTOR)
        .next()
        .ok_or_else(|| RomdlError::parse("could not find listing table (table#list)"))?;

    let mut rows = Vec::new();
    for (index, tr) in table
        .select(&TABLE_ROW_SELECTOR)
        .enumerate()
        .skip(SKIPPED_LEADING_ROWS)
    {
        match Row::from_element(tr) {
            Ok(row) => rows.push(row),
            Err(e) => tracing::debug!(index, "skipping listing row: {}", e),
        }
    }
    tracing::debug!(count = rows.len(), "parsed listing rows");
    Ok(rows)
}
