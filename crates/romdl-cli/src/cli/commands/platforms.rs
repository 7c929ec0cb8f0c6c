//! `romdl platforms` – list platforms and their sources.

use anyhow::Result;
use romdl_core::config::RomdlConfig;
use romdl_core::registry::ConsoleRegistry;

pub fn run_platforms(cfg: &RomdlConfig) -> Result<()> {
    let registry = ConsoleRegistry::from_seeds(&cfg.source_seeds())?;
    let platforms = registry.platforms();
    if platforms.is_empty() {
        println!("No platforms registered.");
        return Ok(());
    }
    for platform in platforms {
        println!("{}", platform);
        for url in registry.sources_for_platform(platform) {
            println!("    {}", url);
        }
    }
    Ok(())
}
