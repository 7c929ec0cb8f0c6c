use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::platform::PlatformType;

/// Environment variable overriding `save_path`.
pub const SAVE_PATH_ENV: &str = "ROMDL_SAVE_PATH";
/// Environment variable overriding `cache_path`.
pub const CACHE_PATH_ENV: &str = "ROMDL_CACHE_PATH";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; Win64; x64; rv:47.0) Gecko/20100101 Firefox/47.0";

/// Retry parameters for binary downloads (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per download (including the first).
    pub max_attempts: u32,
    /// Lower bound of the random wait between attempts, in seconds.
    pub min_wait_secs: f64,
    /// Upper bound of the random wait between attempts, in seconds.
    pub max_wait_secs: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_wait_secs: 1.0,
            max_wait_secs: 2.0,
        }
    }
}

/// One (platform, base URL) registration in the platform registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSeed {
    pub platform: PlatformType,
    pub url: String,
}

impl SourceSeed {
    pub fn new(platform: PlatformType, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
        }
    }
}

/// Global configuration loaded from `~/.config/romdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RomdlConfig {
    /// Root directory for downloaded files.
    pub save_path: PathBuf,
    /// Root directory for the listing response cache.
    pub cache_path: PathBuf,
    /// Cached listing pages expire after this many seconds.
    #[serde(default = "default_cache_expire_secs")]
    pub cache_expire_secs: u64,
    /// Per-attempt timeout for listing requests, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// User-Agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional platform registry; if missing, the built-in seed list is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceSeed>>,
}

fn default_cache_expire_secs() -> u64 {
    3 * 60 * 60
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for RomdlConfig {
    fn default() -> Self {
        let (save_path, cache_path) = default_dirs();
        Self {
            save_path,
            cache_path,
            cache_expire_secs: default_cache_expire_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            retry: None,
            sources: None,
        }
    }
}

impl RomdlConfig {
    pub fn cache_expire_after(&self) -> Duration {
        Duration::from_secs(self.cache_expire_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn retry_config(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }

    /// Seed list for the console registry: configured sources or the built-in list.
    pub fn source_seeds(&self) -> Vec<SourceSeed> {
        self.sources
            .clone()
            .unwrap_or_else(crate::registry::default_seeds)
    }

    /// Apply `ROMDL_SAVE_PATH` / `ROMDL_CACHE_PATH` if set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(SAVE_PATH_ENV).ok(),
            std::env::var(CACHE_PATH_ENV).ok(),
        );
    }

    fn apply_overrides(&mut self, save: Option<String>, cache: Option<String>) {
        if let Some(p) = save.filter(|s| !s.trim().is_empty()) {
            self.save_path = PathBuf::from(p);
        }
        if let Some(p) = cache.filter(|s| !s.trim().is_empty()) {
            self.cache_path = PathBuf::from(p);
        }
    }
}

/// XDG data and cache locations; falls back to relative paths when the
/// base directories cannot be determined.
fn default_dirs() -> (PathBuf, PathBuf) {
    match xdg::BaseDirectories::with_prefix("romdl") {
        Ok(dirs) => (
            dirs.get_data_home().join("romdl").join("games"),
            dirs.get_cache_home().join("romdl").join("http"),
        ),
        Err(_) => (PathBuf::from("games"), PathBuf::from(".romdl-cache")),
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("romdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
/// Environment overrides are applied after loading.
pub fn load_or_init() -> Result<RomdlConfig> {
    let path = config_path()?;
    let mut cfg = if !path.exists() {
        let default_cfg = RomdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        default_cfg
    } else {
        let data = fs::read_to_string(&path)
            .with_context(|| format!("read config: {}", path.display()))?;
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?
    };
    cfg.apply_env_overrides();
    Ok(cfg)
}
