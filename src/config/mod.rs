//! Configuration: TOML file, environment overrides, resolved client settings

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BalanceError, Result};
use crate::infrastructure::abi::DEFAULT_EXPLORER_URL;

/// Infura mainnet endpoint; the project id is appended.
pub const INFURA_MAINNET_URL: &str = "https://mainnet.infura.io/v3/";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// On-disk configuration (`config.toml`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// API project id used to build the default Infura URL
    pub infura_project_id: Option<String>,

    /// Full RPC URL; takes precedence over `infura_project_id`
    pub rpc_url: Option<String>,

    pub explorer_url: Option<String>,

    pub explorer_api_key: Option<String>,

    /// Timeout for explorer requests
    pub request_timeout_secs: Option<u64>,
}

/// Settings the client is constructed from
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub rpc_url: String,
    pub explorer_url: String,
    pub explorer_api_key: Option<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| BalanceError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
            .map_err(|e| BalanceError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Config>(content).map_err(|e| BalanceError::Config(e.to_string()))
    }

    /// Override fields from the environment.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(id) = non_empty("INFURA_PROJECT_ID") {
            self.infura_project_id = Some(id);
        }
        if let Some(url) = non_empty("ETHBAL_RPC_URL") {
            self.rpc_url = Some(url);
        }
        if let Some(key) = non_empty("ETHERSCAN_API_KEY") {
            self.explorer_api_key = Some(key);
        }
    }

    /// Resolve into client settings.
    ///
    /// Fails when neither an RPC URL nor a project id is configured.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let rpc_url = match (&self.rpc_url, &self.infura_project_id) {
            (Some(url), _) => url.trim().to_string(),
            (None, Some(id)) => format!("{INFURA_MAINNET_URL}{}", id.trim()),
            (None, None) => {
                return Err(BalanceError::Config(
                    "no RPC endpoint: set INFURA_PROJECT_ID or rpc_url".into(),
                ))
            }
        };

        Ok(ClientConfig {
            rpc_url,
            explorer_url: self
                .explorer_url
                .clone()
                .unwrap_or_else(|| DEFAULT_EXPLORER_URL.to_string()),
            explorer_api_key: self.explorer_api_key.clone(),
            request_timeout: Duration::from_secs(
                self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("ETHBAL_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("ethbal").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("ethbal").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "ethbal", "ethbal")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
