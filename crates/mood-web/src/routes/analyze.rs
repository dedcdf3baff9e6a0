//! Analysis route handlers.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    Json,
};
use mood_core::{AnalysisResult, MoodError};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

const TEXT_MISSING: &str = "Текст не передан";
const IMAGES_MISSING: &str = "Изображения не переданы";
const IMAGES_NOT_STRINGS: &str = "Изображения должны быть строками";
const INVALID_BODY: &str = "Некорректный JSON в теле запроса";

/// POST /api/analyze - Analyze free text.
pub async fn analyze_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let analyzer = state.analyzer()?;
    let body = parse_body(&body?)?;

    let text = body
        .get("text")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| MoodError::validation(TEXT_MISSING))?;

    info!(chars = text.chars().count(), "Text analysis requested");
    let result = analyzer.analyze_text(text).await?;
    Ok(Json(result))
}

/// POST /api/analyze-video - Analyze camera or video frames.
pub async fn analyze_video(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<AnalysisResult>, ApiError> {
    let analyzer = state.analyzer()?;
    let body = parse_body(&body?)?;

    let images = body
        .get("images")
        .and_then(Value::as_array)
        .filter(|images| !images.is_empty())
        .ok_or_else(|| MoodError::validation(IMAGES_MISSING))?
        .iter()
        .map(|img| img.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| MoodError::validation(IMAGES_NOT_STRINGS))?;

    info!(images = images.len(), "Video analysis requested");
    let result = analyzer.analyze_images(images).await?;
    Ok(Json(result))
}

/// Parse a JSON request body. An empty body counts as `{}`; non-object JSON has no fields.
fn parse_body(body: &[u8]) -> Result<Map<String, Value>, MoodError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(_) => Err(MoodError::validation(INVALID_BODY)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert!(parse_body(b"").unwrap().is_empty());
        assert!(parse_body(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        assert!(parse_body(b"null").unwrap().is_empty());
        assert!(parse_body(b"[1,2]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_body_is_validation_error() {
        let err = parse_body(b"{text:").unwrap_err();
        assert!(err.is_client_error());
    }
}
