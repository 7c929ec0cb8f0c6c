//! `romdl search <platform> <title>` – print matching entries.

use anyhow::Result;
use romdl_core::config::RomdlConfig;

use super::session::{build_orchestrator, print_candidates, print_no_results};

pub async fn run_search(cfg: &RomdlConfig, platform: String, title: String) -> Result<()> {
    let cfg = cfg.clone();
    // Fetching is blocking (curl); keep it off the runtime threads.
    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut orch = build_orchestrator(&cfg)?;
        let outcome = orch.search(&platform, &title)?;
        if outcome.is_empty() {
            print_no_results(&platform, &title);
        } else {
            print_candidates(&outcome);
        }
        Ok(())
    })
    .await?
}
