// Configuration loader
// Loads settings from ~/.premortem/config.toml, then fills the API key from
// the environment when the file does not provide one.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{API_KEY_ENV_VARS, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use super::settings::Config;

/// Command-line values that take precedence over the file and environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: Option<String>,
}

/// Default config file location
pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load and validate configuration
pub fn load_config(overrides: &Overrides) -> Result<Config> {
    let path = match &overrides.config_path {
        Some(path) => path.clone(),
        None => default_config_path()?,
    };

    let mut config = match load_from_file(&path)? {
        Some(config) => config,
        None if overrides.config_path.is_some() => {
            anyhow::bail!("Configuration file not found: {}", path.display())
        }
        None => Config::default(),
    };

    apply_env_key(&mut config, |name| std::env::var(name).ok());

    if let Some(api_key) = &overrides.api_key {
        config.gemini.api_key = api_key.clone();
    }
    if let Some(model) = &overrides.model {
        config.gemini.model = model.clone();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Parse a config file, `Ok(None)` if it does not exist
pub fn load_from_file(path: &Path) -> Result<Option<Config>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse configuration file {}", path.display()))?;

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(Some(config))
}

/// Fill an empty API key from the first non-empty environment variable
fn apply_env_key(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if !config.gemini.api_key.trim().is_empty() {
        return;
    }
    if let Some(key) = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
    {
        config.gemini.api_key = key;
    }
}
