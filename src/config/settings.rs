// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::constants::{DEFAULT_GEMINI_MODEL, GEMINI_BASE_URL, REQUEST_TIMEOUT_SECS};

fn default_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_base_url() -> String {
    GEMINI_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

/// Gemini connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSettings {
    /// API key (may also come from GEMINI_API_KEY / API_KEY)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gemini: GeminiSettings,
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_key.trim().is_empty() {
            bail!(
                "No Gemini API key configured. Add it to ~/.premortem/config.toml:\n\n\
                [gemini]\n\
                api_key = \"...\"\n\n\
                or set the GEMINI_API_KEY environment variable."
            );
        }
        if self.gemini.model.trim().is_empty() {
            bail!("gemini.model must not be empty");
        }
        if self.gemini.base_url.trim().is_empty() {
            bail!("gemini.base_url must not be empty");
        }
        if self.gemini.timeout_secs == 0 {
            bail!("gemini.timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gemini.model, "gemini-3-flash-preview");
        assert_eq!(config.gemini.timeout_secs, 60);
        assert!(config.validate().is_err(), "missing key must not validate");
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        config.gemini.api_key = "key".to_string();
        assert!(config.validate().is_ok());

        config.gemini.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[gemini]\napi_key = \"abc\"\n").unwrap();
        assert_eq!(config.gemini.api_key, "abc");
        assert_eq!(config.gemini.base_url, GEMINI_BASE_URL);
    }
}
