//! `romdl forget <id>` – delete a history record.

use anyhow::{bail, Result};
use romdl_core::library_db::LibraryDb;

pub async fn run_forget(db: &LibraryDb, id: i64) -> Result<()> {
    if !db.delete(id).await? {
        bail!("no download record with id {}", id);
    }
    println!("Forgot download {id}");
    Ok(())
}
