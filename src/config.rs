use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::version::ordering::SortMode;

// =============================================================================
// Network-related constants
// =============================================================================

/// Default search provider, a local instance of the search service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Timeout for search requests in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Repositories offered by the default search provider
pub const DEFAULT_REPOSITORIES: &[&str] = &[
    "rhel-8-for-x86_64-baseos-rpms",
    "rhel-8-for-x86_64-appstream-rpms",
    "rhel-9-for-x86_64-baseos-rpms",
    "rhel-9-for-x86_64-appstream-rpms",
    "rhel-8-epel-rpms",
    "rhel-9-epel-rpms",
    "codeready-builder-for-rhel-8-x86_64-rpms",
    "codeready-builder-for-rhel-9-x86_64-rpms",
];

const APP_NAME: &str = "repo-query";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryConfig {
    pub server: ServerConfig,
    pub ranking: RankingConfig,
    /// Repository ids accepted by `--repo`; empty allows any id
    pub repositories: Vec<String>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ranking: RankingConfig::default(),
            repositories: DEFAULT_REPOSITORIES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Search provider configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

/// Version ranking configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RankingConfig {
    pub sort_mode: SortMode,
}

impl QueryConfig {
    /// Load the configuration from `path`, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config file at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Returns the path to the data directory for repo-query.
/// Uses $XDG_DATA_HOME/repo-query if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/repo-query,
/// or ./repo-query if neither is available.
pub fn data_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the path to the configuration directory, resolved like
/// [`data_dir`] from $XDG_CONFIG_HOME and ~/.config.
pub fn config_dir() -> PathBuf {
    dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("repo-query.log")
}

fn dir_with_env(xdg_dir: Option<String>, home_dir: Option<PathBuf>, home_suffix: &str) -> PathBuf {
    let base = xdg_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_suffix)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
