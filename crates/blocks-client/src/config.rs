//! Client configuration and loading.
//!
//! Note: Custom Debug impl masks the API token to prevent accidental
//! exposure in logs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the flashcard API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct BlocksConfig {
    /// Base URL of the flashcard API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the API. Supports `${VAR}` references.
    #[serde(default)]
    pub api_token: String,
    /// How many leaderboard rows to display.
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,
}

impl std::fmt::Debug for BlocksConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlocksConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"***")
            .field("leaderboard_limit", &self.leaderboard_limit)
            .finish()
    }
}

fn default_api_url() -> String {
    "https://api.studyblocks.dev".to_string()
}

fn default_leaderboard_limit() -> usize {
    5
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: String::new(),
            leaderboard_limit: default_leaderboard_limit(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `blocks.toml` in the current directory
/// 2. `~/.config/blocks/config.toml`
///
/// Environment variable overrides: `BLOCKS_API_URL`, `BLOCKS_API_TOKEN`.
pub fn load_config() -> Result<BlocksConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<BlocksConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("blocks.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
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
            toml::from_str::<BlocksConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => BlocksConfig::default(),
    };

    if let Ok(url) = std::env::var("BLOCKS_API_URL") {
        config.api_url = url;
    }
    if let Ok(token) = std::env::var("BLOCKS_API_TOKEN") {
        config.api_token = token;
    }

    config.api_url = resolve_env_vars(&config.api_url);
    config.api_token = resolve_env_vars(&config.api_token);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("blocks"))
}
