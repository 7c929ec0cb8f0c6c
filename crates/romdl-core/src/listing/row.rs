//! One parsed listing entry.

use scraper::{ElementRef, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::error::{Result, RomdlError};
use crate::url_model::derive_file_name;

static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("static selector"));
static LINK_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.link").expect("static selector"));
static SIZE_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.size").expect("static selector"));
static DATE_CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.date").expect("static selector"));
static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("static selector"));

/// A listing entry: display title, link (relative or absolute), and the
/// local file name derived from the link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub title: String,
    pub link: String,
    pub file_name: String,
    /// Size column text, if present.
    pub size: Option<String>,
    /// Date column text, if present.
    pub date: Option<String>,
}

impl Row {
    /// Builds a row from a title and link, deriving the file name.
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            title: title.into(),
            file_name: derive_file_name(&link),
            link,
            size: None,
            date: None,
        }
    }

    /// Parses one `<tr>` element.
    ///
    /// The title is the `title` attribute of the anchor in the first cell; the
    /// link is the `href` of the anchor in the `td.link` cell.
    pub fn from_element(tr: ElementRef<'_>) -> Result<Self> {
        let first_cell = tr
            .select(&CELL_SELECTOR)
            .next()
            .ok_or_else(|| RomdlError::parse("table row has no data cells"))?;
        let title = first_cell
            .select(&ANCHOR_SELECTOR)
            .next()
            .ok_or_else(|| RomdlError::parse("no anchor in first cell"))?
            .value()
            .attr("title")
            .ok_or_else(|| RomdlError::parse("anchor has no title attribute"))?;

        let link_cell = tr
            .select(&LINK_CELL_SELECTOR)
            .next()
            .ok_or_else(|| RomdlError::parse("table row has no link cell"))?;
        let href = link_cell
            .select(&ANCHOR_SELECTOR)
            .next()
            .ok_or_else(|| RomdlError::parse("no anchor in link cell"))?
            .value()
            .attr("href")
            .ok_or_else(|| RomdlError::parse("anchor has no href attribute"))?;

        let mut row = Row::new(title, href);
        row.size = cell_text(tr, &SIZE_CELL_SELECTOR);
        row.date = cell_text(tr, &DATE_CELL_SELECTOR);
        Ok(row)
    }

    /// Case-insensitive substring match on the title, both sides trimmed.
    pub fn title_matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.title.trim().to_lowercase().contains(&needle)
    }
}

fn cell_text(tr: ElementRef<'_>, selector: &Selector) -> Option<String> {
    tr.select(selector)
        .next()
        .map(|td| td.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
