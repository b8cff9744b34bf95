//! Publisher configuration loaded from `agenda-publisher.toml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::network::Network;

/// Environment variable consulted when `repository.fork_owner` is not set.
pub const FORK_OWNER_ENV: &str = "AGENDA_FORK_OWNER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Canonical metadata repository and the fork used to stage changes.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// GitHub REST API access.
    #[serde(default)]
    pub github: GitHubConfig,
    /// Fork-readiness polling.
    #[serde(default)]
    pub fork: ForkPollConfig,
    /// One JSON-RPC endpoint per network.
    #[serde(default)]
    pub rpc: RpcConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.repository.validate()?;
        self.github.validate()?;
        self.fork.validate()?;
        self.rpc.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_name")]
    pub name: String,
    /// Account that owns (or will own) the fork.
    #[serde(default)]
    pub fork_owner: Option<String>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self { owner: default_owner(), name: default_name(), fork_owner: None }
    }
}

impl RepositoryConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.owner.trim().is_empty() {
            return Err(AppError::config_error("repository.owner must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::config_error("repository.name must not be empty"));
        }
        if self.fork_owner.as_deref().is_some_and(|owner| owner.trim().is_empty()) {
            return Err(AppError::config_error("repository.fork_owner must not be empty"));
        }
        Ok(())
    }

    pub fn upstream_full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// The configured fork owner, falling back to `AGENDA_FORK_OWNER`.
    pub fn resolve_fork_owner(&self) -> Result<String, AppError> {
        if let Some(owner) = &self.fork_owner {
            return Ok(owner.clone());
        }
        std::env::var(FORK_OWNER_ENV)
            .ok()
            .filter(|owner| !owner.trim().is_empty())
            .ok_or_else(|| {
                AppError::config_error(format!(
                    "No fork owner configured: set repository.fork_owner or {FORK_OWNER_ENV}"
                ))
            })
    }
}

fn default_owner() -> String {
    "tokamak-network".to_string()
}

fn default_name() -> String {
    "dao-agenda-metadata-repository".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GitHubConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            token_env: default_token_env(),
        }
    }
}

impl GitHubConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("github.timeout_secs must be greater than 0"));
        }
        if self.token_env.trim().is_empty() {
            return Err(AppError::config_error("github.token_env must not be empty"));
        }
        Ok(())
    }

    pub fn token(&self) -> Result<String, AppError> {
        std::env::var(&self.token_env).map_err(|_| {
            AppError::config_error(format!("{} environment variable not set", self.token_env))
        })
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.github.com/").expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    30
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForkPollConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
}

impl Default for ForkPollConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
        }
    }
}

impl ForkPollConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.poll_interval_ms == 0 {
            return Err(AppError::config_error("fork.poll_interval_ms must be greater than 0"));
        }
        if self.max_poll_attempts == 0 {
            return Err(AppError::config_error("fork.max_poll_attempts must be greater than 0"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn default_poll_interval_ms() -> u64 {
    3000
}

fn default_max_poll_attempts() -> u32 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpcConfig {
    #[serde(default)]
    pub mainnet_url: Option<Url>,
    #[serde(default)]
    pub sepolia_url: Option<Url>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self { mainnet_url: None, sepolia_url: None, timeout_secs: default_timeout() }
    }
}

impl RpcConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("rpc.timeout_secs must be greater than 0"));
        }
        Ok(())
    }

    pub fn endpoint(&self, network: Network) -> Option<&Url> {
        match network {
            Network::Mainnet => self.mainnet_url.as_ref(),
            Network::Sepolia => self.sepolia_url.as_ref(),
        }
    }
}
