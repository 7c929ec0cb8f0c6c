//! `romdl get <platform> <title> [--pick N]` – search, download, record.

use anyhow::Result;
use romdl_core::config::RomdlConfig;
use romdl_core::library_db::{DownloadId, LibraryDb, NewDownload};
use romdl_core::orchestrator::{Candidate, SearchOutcome};
use std::path::{Path, PathBuf};

use super::session::{build_orchestrator, print_candidates, print_no_results};

pub async fn run_get(
    cfg: &RomdlConfig,
    db: &LibraryDb,
    platform: String,
    title: String,
    pick: Option<usize>,
) -> Result<()> {
    let cfg = cfg.clone();
    let downloaded = tokio::task::spawn_blocking(
        move || -> Result<Option<(Candidate, PathBuf)>> {
            let mut orch = build_orchestrator(&cfg)?;
            let outcome = orch.search(&platform, &title)?;
            let candidate = match (&outcome, pick) {
                (SearchOutcome::Empty, _) => {
                    print_no_results(&platform, &title);
                    return Ok(None);
                }
                (_, Some(index)) => outcome.select(index)?.clone(),
                (SearchOutcome::Single(c), None) => c.clone(),
                (SearchOutcome::Multiple(_), None) => {
                    print_candidates(&outcome);
                    println!("Several matches; re-run with --pick N to choose one.");
                    return Ok(None);
                }
            };
            println!("Downloading {} ...", candidate.row.title);
            let path = orch.download(&candidate)?;
            Ok(Some((candidate, path)))
        },
    )
    .await??;

    let Some((candidate, path)) = downloaded else {
        return Ok(());
    };
    let (id, created) = record_download(db, &candidate, &path).await?;
    tracing::debug!(id, created, path = %path.display(), "recorded download");
    println!("Saved to {}", path.display());
    Ok(())
}

/// Adds a history record for `path`, or refreshes the one already pointing
/// there. Returns the record id and whether it is new.
pub async fn record_download(
    db: &LibraryDb,
    candidate: &Candidate,
    path: &Path,
) -> Result<(DownloadId, bool)> {
    let download = NewDownload {
        title: candidate.row.title.clone(),
        platform: candidate.platform,
        source_url: candidate.source_url.clone(),
        file_name: candidate.row.file_name.clone(),
        file_path: path.to_path_buf(),
    };
    match db.find_by_path(path).await? {
        Some(existing) => {
            db.update(existing.id, &download).await?;
            Ok((existing.id, false))
        }
        None => Ok((db.create(&download).await?, true)),
    }
}
