//! HTTP error responses.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mood_core::MoodError;
use serde_json::json;
use tracing::{debug, error};

/// Error returned by handlers, rendered as `{ "error": message }`.
#[derive(Debug)]
pub enum ApiError {
    /// Domain failure from validation, configuration or the completion call.
    Mood(MoodError),
    /// The request body could not be read, e.g. it exceeded the size limit.
    Body(BytesRejection),
}

impl From<MoodError> for ApiError {
    fn from(err: MoodError) -> Self {
        Self::Mood(err)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        Self::Body(rejection)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Mood(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Mood(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Body(rejection) => rejection.status(),
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Mood(err) => err.to_string(),
            Self::Body(rejection) => rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            error!(error = %message, "Request failed");
        } else {
            debug!(%status, error = %message, "Rejected request");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
