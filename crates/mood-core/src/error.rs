//! Centralized error types for Mood.

use thiserror::Error;

/// Maximum number of characters of an upstream error body kept in messages.
pub const UPSTREAM_SNIPPET_LEN: usize = 200;

/// Main error type for Mood operations.
#[derive(Error, Debug)]
pub enum MoodError {
    #[error("{0}")]
    ValidationError(String),

    #[error("OPENAI_API_KEY не задан. Создайте файл .env с ключом.")]
    MissingCredential,

    #[error("OpenAI API: {status} - {body}")]
    Upstream { status: u16, body: String },

    #[error("Ошибка соединения с OpenAI: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Некорректная длительность видео: {0}")]
    InvalidDuration(f64),

    #[error("Ошибка загрузки видео: {0}")]
    VideoLoad(String),

    #[error("Камера недоступна: {0}")]
    Camera(String),
}

/// Result type for Mood operations.
pub type MoodResult<T> = Result<T, MoodError>;

impl MoodError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create an upstream error, keeping only a snippet of the body.
    pub fn upstream(status: u16, body: &str) -> Self {
        Self::Upstream {
            status,
            body: body.trim().chars().take(UPSTREAM_SNIPPET_LEN).collect(),
        }
    }

    /// Whether the caller can recover by correcting its input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
