//! Building the orchestrator and printing candidates.

use anyhow::Result;
use romdl_core::config::RomdlConfig;
use romdl_core::fetch::ContentFetcher;
use romdl_core::orchestrator::{Orchestrator, SearchOutcome};
use romdl_core::registry::ConsoleRegistry;

pub fn build_orchestrator(cfg: &RomdlConfig) -> Result<Orchestrator> {
    let registry = ConsoleRegistry::from_seeds(&cfg.source_seeds())?;
    let fetcher = ContentFetcher::from_config(cfg);
    Ok(Orchestrator::new(registry, fetcher, &cfg.save_path))
}

pub fn print_candidates(outcome: &SearchOutcome) {
    for (index, c) in outcome.candidates().iter().enumerate() {
        let size = c.row.size.as_deref().unwrap_or("-");
        println!("{:>3} - {} [{}]", index + 1, c.row.title, size);
    }
}

pub fn print_no_results(platform: &str, title: &str) {
    println!(
        "No results for \"{}\" on {}. Try a shorter or different title.",
        title.trim(),
        platform.trim()
    );
}
