//! Configuration file discovery and parsing.

use std::path::Path;

use super::AppConfig;
use crate::domain::AppError;

/// File consulted in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "agenda-publisher.toml";

/// Load the configuration.
///
/// An explicit path must exist. Without one, a missing default file yields
/// the built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    let (path, explicit) = match path {
        Some(path) => (path, true),
        None => (Path::new(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if explicit {
            return Err(AppError::config_error(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        log::debug!("No {} found; using defaults", path.display());
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
