mod app_config;
mod loader;

pub use app_config::{
    AppConfig, FORK_OWNER_ENV, ForkPollConfig, GitHubConfig, RepositoryConfig, RpcConfig,
};
pub use loader::{DEFAULT_CONFIG_FILE, load_config, parse_config_content};
