//! CLI configuration: where the service lives and where sessions persist.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use algodrill_service::client::DEFAULT_TIMEOUT_SECS;

/// Top-level algodrill configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgodrillConfig {
    /// Base URL of the generation/evaluation service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory holding the durable session state.
    #[serde(default = "default_storage_dir")]
    pub storage_dir: PathBuf,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_storage_dir() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("algodrill"),
        Err(_) => PathBuf::from("./.algodrill"),
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AlgodrillConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            storage_dir: default_storage_dir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `algodrill.toml` in the current directory
/// 2. `~/.config/algodrill/config.toml`
///
/// Environment variable overrides: `ALGODRILL_BASE_URL`,
/// `ALGODRILL_STORAGE_DIR`, `ALGODRILL_TIMEOUT_SECS`.
pub fn load_config_from(path: Option<&Path>) -> Result<AlgodrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("algodrill.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = dirs_path() {
            let global = dir.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AlgodrillConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AlgodrillConfig::default(),
    };

    if let Ok(url) = std::env::var("ALGODRILL_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(dir) = std::env::var("ALGODRILL_STORAGE_DIR") {
        config.storage_dir = PathBuf::from(dir);
    }
    if let Ok(secs) = std::env::var("ALGODRILL_TIMEOUT_SECS") {
        config.timeout_secs = secs
            .parse()
            .context("ALGODRILL_TIMEOUT_SECS must be a number of seconds")?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("algodrill"))
}
