//! Record writes: create, update, delete.

use anyhow::{bail, Result};

use super::super::db::{unix_timestamp, LibraryDb};
use super::super::types::{DownloadId, NewDownload};

impl LibraryDb {
    pub async fn create(&self, download: &NewDownload) -> Result<DownloadId> {
        let now = unix_timestamp();
        let result = sqlx::query(
            r#"
            INSERT INTO downloads (title, platform, source_url, file_name, file_path, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(&download.title)
        .bind(download.platform.as_str())
        .bind(&download.source_url)
        .bind(&download.file_name)
        .bind(download.file_path.to_string_lossy().into_owned())
        .bind(now)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Replaces every field of record `id`. Fails if the record does not exist.
    pub async fn update(&self, id: DownloadId, download: &NewDownload) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE downloads
            SET title = ?1, platform = ?2, source_url = ?3, file_name = ?4, file_path = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
        )
        .bind(&download.title)
        .bind(download.platform.as_str())
        .bind(&download.source_url)
        .bind(&download.file_name)
        .bind(download.file_path.to_string_lossy().into_owned())
        .bind(unix_timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            bail!("download record {} not found", id);
        }
        Ok(())
    }

    /// Deletes record `id`. Returns whether a record was removed.
    pub async fn delete(&self, id: DownloadId) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM downloads WHERE id = ?1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
