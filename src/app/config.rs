//! Configuration loading from the repository.

use std::path::Path;

use crate::domain::{AppError, WfconfConfig};

/// Load and validate the configuration file at `path`.
pub fn load_config(path: &Path) -> Result<WfconfConfig, AppError> {
    if !path.exists() {
        return Err(AppError::ConfigMissing(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    parse_config_content(&content)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<WfconfConfig, AppError> {
    let config: WfconfConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
