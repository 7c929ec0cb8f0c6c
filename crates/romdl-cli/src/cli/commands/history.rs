//! `romdl history` – list recorded downloads.

use anyhow::Result;
use romdl_core::library_db::{FindQuery, LibraryDb};

pub async fn run_history(db: &LibraryDb, page: i64, page_size: i64, filter: String) -> Result<()> {
    let query = FindQuery::new(page, page_size, filter)?;
    let records = db.list(&query).await?;
    if records.is_empty() {
        println!("No downloads recorded.");
        return Ok(());
    }
    println!("{:<6} {:<16} {:<40} {}", "ID", "PLATFORM", "TITLE", "PATH");
    for r in records {
        println!(
            "{:<6} {:<16} {:<40} {}",
            r.id,
            r.platform,
            r.title,
            r.file_path.display()
        );
    }
    Ok(())
}
