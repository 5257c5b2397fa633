// Project-wide constants
//
// Centralised here so defaults and user-facing strings have one source of
// truth. Import via `use crate::config::constants::*;`.

/// Gemini REST API root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when neither the config file nor `--model` names one.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// HTTP timeout for a single generateContent call.
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Directory under the home directory holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = ".premortem";

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

pub const MIN_DOOM_LEVEL: u8 = 1;
pub const MAX_DOOM_LEVEL: u8 = 10;
pub const DEFAULT_DOOM_LEVEL: u8 = 5;

/// Items inverted when the user selected none.
pub const FALLBACK_WORKING_SET: usize = 3;

pub const ROADMAP_FAILURE_MESSAGE: &str = "Analysis corrupted. The chaos was too great.";

pub const INVERSION_FAILURE_MESSAGE: &str = "Failed to invert chaos. Darkness prevails.";
