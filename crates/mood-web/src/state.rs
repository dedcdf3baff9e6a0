//! Application state.

use std::sync::Arc;

use mood_core::{Analyzer, Config, MoodError, OpenAiClient};
use tracing::warn;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no completion credential is configured.
    analyzer: Option<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Option<Analyzer>) -> Self {
        Self { analyzer }
    }

    /// Build state from configuration, without an analyzer if the credential is unset.
    pub fn from_config(config: &Config) -> Self {
        match OpenAiClient::from_config(config) {
            Ok(client) => Self::new(Some(Analyzer::new(Arc::new(client)))),
            Err(e) => {
                warn!(error = %e, "Analysis endpoints will answer with a configuration error");
                Self::new(None)
            }
        }
    }

    /// The analyzer, or the credential-missing error.
    pub fn analyzer(&self) -> Result<&Analyzer, MoodError> {
        self.analyzer.as_ref().ok_or(MoodError::MissingCredential)
    }
}
