use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default `User-Agent` for outbound fetches: identifies the bot, claims nothing else.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; secr/0.1; preview fetcher)";

/// Global configuration loaded from `~/.config/secr/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecrConfig {
    /// Maximum number of fetches the redirect walker performs for one URL.
    pub hop_limit: u32,
    /// Per-request timeout in seconds (connect + transfer).
    pub timeout_secs: u64,
    /// `User-Agent` header sent on every outbound request.
    pub user_agent: String,
    /// Body bytes read when scanning a page for its preview image.
    pub max_scan_bytes: usize,
    /// Body bytes read from a wrapper page. Wrapper pages are small; this only guards against abuse.
    #[serde(default = "default_max_wrapper_bytes")]
    pub max_wrapper_bytes: usize,
    /// Maximum number of cached results.
    pub cache_capacity: usize,
    /// Lifetime of a cached result in seconds.
    pub cache_ttl_secs: u64,
}

fn default_max_wrapper_bytes() -> usize {
    512 * 1024
}

impl Default for SecrConfig {
    fn default() -> Self {
        Self {
            hop_limit: 5,
            timeout_secs: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_scan_bytes: 50 * 1024,
            max_wrapper_bytes: default_max_wrapper_bytes(),
            cache_capacity: 500,
            cache_ttl_secs: 3600,
        }
    }
}

impl SecrConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("secr")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SecrConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but with an explicit path (used by tests and `--config`).
pub fn load_or_init_at(path: &Path) -> Result<SecrConfig> {
    if !path.exists() {
        let default_cfg = SecrConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SecrConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
