//! `romdl clear-cache` – drop cached listing pages.

use anyhow::{Context, Result};
use romdl_core::config::RomdlConfig;
use romdl_core::fetch::ResponseCache;

pub fn run_clear_cache(cfg: &RomdlConfig) -> Result<()> {
    let cache = ResponseCache::new(&cfg.cache_path, cfg.cache_expire_after());
    cache
        .clear()
        .with_context(|| format!("clear cache at {}", cfg.cache_path.display()))?;
    println!("Cleared cache at {}", cfg.cache_path.display());
    Ok(())
}
