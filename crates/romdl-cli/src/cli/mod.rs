//! CLI for romdl.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use romdl_core::config;
use romdl_core::library_db::{LibraryDb, DEFAULT_PAGE_SIZE};

use commands::{
    run_clear_cache, run_forget, run_get, run_history, run_platforms, run_search,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "romdl")]
#[command(about = "romdl: find game archives on listing sites and download them", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List registered platforms and their listing URLs.
    Platforms,

    /// Search a platform's listings for a title.
    Search {
        /// Platform identifier (e.g. gamecube, "playstation 3").
        platform: String,
        /// Case-insensitive title substring.
        title: String,
    },

    /// Search and download. A single match downloads directly; several
    /// matches need --pick.
    Get {
        /// Platform identifier.
        platform: String,
        /// Case-insensitive title substring.
        title: String,
        /// 1-based index into the search results.
        #[arg(long, value_name = "N")]
        pick: Option<usize>,
    },

    /// Show recorded downloads, newest first.
    History {
        /// Zero-based page index.
        #[arg(long, default_value_t = 0, value_name = "N")]
        page: i64,
        /// Records per page.
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_name = "N")]
        page_size: i64,
        /// Only records whose title contains TEXT.
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Delete a history record (the downloaded file is kept).
    Forget {
        /// Record identifier.
        id: i64,
    },

    /// Remove every cached listing page.
    ClearCache,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Platforms => run_platforms(&cfg)?,
            CliCommand::Search { platform, title } => run_search(&cfg, platform, title).await?,
            CliCommand::Get {
                platform,
                title,
                pick,
            } => {
                let db = LibraryDb::open_default().await?;
                run_get(&cfg, &db, platform, title, pick).await?;
            }
            CliCommand::History {
                page,
                page_size,
                filter,
            } => {
                let db = LibraryDb::open_default().await?;
                run_history(&db, page, page_size, filter.unwrap_or_default()).await?;
            }
            CliCommand::Forget { id } => {
                let db = LibraryDb::open_default().await?;
                run_forget(&db, id).await?;
            }
            CliCommand::ClearCache => run_clear_cache(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
