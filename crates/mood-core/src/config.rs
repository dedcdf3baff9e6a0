//! Runtime configuration.
//!
//! Values come from the process environment and an optional `.env` key-value
//! file. Values in the file override the process environment; empty values
//! count as unset.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::completion::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::error::{MoodError, MoodResult};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL";
pub const API_URL_VAR: &str = "OPENAI_API_URL";

/// Service configuration.
#[derive(Clone)]
pub struct Config {
    /// Completion service credential. Required by every analysis call.
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.masked_key())
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment and `env_file`, if it exists.
    pub fn load(env_file: Option<&Path>) -> MoodResult<Self> {
        let file = match env_file {
            Some(path) if path.is_file() => read_env_file(path)?,
            Some(path) => {
                debug!(path = %path.display(), "No env file, using process environment only");
                HashMap::new()
            }
            None => HashMap::new(),
        };
        Ok(Self::from_sources(|key| std::env::var(key).ok(), &file))
    }

    /// Resolve configuration from an environment lookup and parsed file values.
    pub fn from_sources<F>(env: F, file: &HashMap<String, String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| {
            file.get(key)
                .cloned()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| env(key).filter(|v| !v.trim().is_empty()))
                .map(|v| v.trim().to_string())
        };

        let defaults = Self::default();
        Self {
            api_key: lookup(API_KEY_VAR),
            model: lookup(MODEL_VAR).unwrap_or(defaults.model),
            api_url: lookup(API_URL_VAR).unwrap_or(defaults.api_url),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// First 8 characters of the credential, for startup logs.
    pub fn masked_key(&self) -> Option<String> {
        self.api_key
            .as_ref()
            .map(|key| format!("{}...", key.chars().take(8).collect::<String>()))
    }
}

/// Parse a `.env` file into key-value pairs.
pub fn read_env_file(path: &Path) -> MoodResult<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| MoodError::Config(format!("{}: {}", path.display(), e)))?;

    let mut values = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                values.insert(key, value);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping malformed env line"),
        }
    }
    debug!(path = %path.display(), count = values.len(), "Loaded env file");
    Ok(values)
}
