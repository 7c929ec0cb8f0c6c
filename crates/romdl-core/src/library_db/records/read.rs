//! Record reads: get, lookup by saved path, paged list.

use anyhow::{anyhow, Context, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use std::path::{Path, PathBuf};

use super::super::db::LibraryDb;
use super::super::types::{DownloadId, DownloadRecord, FindQuery};
use crate::platform::PlatformType;

fn record_from_row(row: &SqliteRow) -> Result<DownloadRecord> {
    let platform: String = row.get("platform");
    let file_path: String = row.get("file_path");
    Ok(DownloadRecord {
        id: row.get("id"),
        title: row.get("title"),
        platform: platform
            .parse::<PlatformType>()
            .with_context(|| format!("stored platform {:?}", platform))?,
        source_url: row.get("source_url"),
        file_name: row.get("file_name"),
        file_path: PathBuf::from(file_path),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl LibraryDb {
    pub async fn get(&self, id: DownloadId) -> Result<Option<DownloadRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, platform, source_url, file_name, file_path, created_at, updated_at
            FROM downloads
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// Like [`get`](Self::get), but a missing record is an error.
    pub async fn get_required(&self, id: DownloadId) -> Result<DownloadRecord> {
        self.get(id)
            .await?
            .ok_or_else(|| anyhow!("download record {} not found", id))
    }

    /// The most recent record whose file was saved at `path`.
    pub async fn find_by_path(&self, path: &Path) -> Result<Option<DownloadRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, platform, source_url, file_name, file_path, created_at, updated_at
            FROM downloads
            WHERE file_path = ?1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(path.to_string_lossy().into_owned())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    /// One page of records, newest first, optionally filtered by title substring.
    pub async fn list(&self, query: &FindQuery) -> Result<Vec<DownloadRecord>> {
        let filter = query.filter.trim();
        let pattern = format!("%{}%", filter.replace('%', "\\%").replace('_', "\\_"));
        let rows = sqlx::query(
            r#"
            SELECT id, title, platform, source_url, file_name, file_path, created_at, updated_at
            FROM downloads
            WHERE ?1 = '' OR title LIKE ?2 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            LIMIT ?3 OFFSET ?4
            "#,
        )
        .bind(filter)
        .bind(pattern)
        .bind(query.limit())
        .bind(query.skip())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }
}
