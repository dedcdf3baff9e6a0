//! Analysis domain models.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MoodError, MoodResult};

/// Emotion marker used when the model reply could not be parsed.
pub const UNKNOWN_EMOTION: &str = "неизвестно";

/// Input mode of a single analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    Text,
    Video,
}

impl InputMode {
    /// Placeholder title of a fallback result in this mode.
    pub fn fallback_title(&self) -> &'static str {
        match self {
            InputMode::Text => "Ваше состояние",
            InputMode::Video => "Состояние",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Text => "text",
            InputMode::Video => "video",
        }
    }
}

/// A request for emotional-state analysis.
///
/// Text and images are mutually exclusive input modes. Each image is either a
/// data URL or a bare base64-encoded JPEG.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Text(String),
    Images(Vec<String>),
}

impl AnalysisRequest {
    /// Create a text request, rejecting blank input.
    pub fn text(text: impl Into<String>) -> MoodResult<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(MoodError::validation("Текст не передан"));
        }
        Ok(Self::Text(text))
    }

    /// Create an image request, rejecting an empty sequence.
    pub fn images(images: Vec<String>) -> MoodResult<Self> {
        if images.is_empty() {
            return Err(MoodError::validation("Изображения не переданы"));
        }
        Ok(Self::Images(images))
    }

    pub fn mode(&self) -> InputMode {
        match self {
            AnalysisRequest::Text(_) => InputMode::Text,
            AnalysisRequest::Images(_) => InputMode::Video,
        }
    }
}

/// Normalized outcome of one emotion-assessment request.
///
/// Fields absent from a model reply, or sent as `null`, deserialize as empty
/// so the shape sent to clients is always complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emotion: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub analysis: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub suggestions: Vec<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalysisResult {
    /// Result synthesized from a reply that is not the expected JSON.
    pub fn fallback(raw: impl Into<String>, mode: InputMode) -> Self {
        Self {
            emotion: UNKNOWN_EMOTION.to_string(),
            title: mode.fallback_title().to_string(),
            analysis: raw.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.emotion == UNKNOWN_EMOTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_request_rejects_empty() {
        let err = AnalysisRequest::text("").unwrap_err();
        assert_eq!(err.to_string(), "Текст не передан");
    }

    #[test]
    fn test_images_request_rejects_empty() {
        let err = AnalysisRequest::images(Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "Изображения не переданы");
    }

    #[test]
    fn test_mode() {
        assert_eq!(AnalysisRequest::text("hi").unwrap().mode(), InputMode::Text);
        assert_eq!(
            AnalysisRequest::images(vec!["abc".into()]).unwrap().mode(),
            InputMode::Video
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let result: AnalysisResult = serde_json::from_str(r#"{"emotion":"радость"}"#).unwrap();
        assert_eq!(result.emotion, "радость");
        assert!(result.title.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_null_fields_default_to_empty() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"emotion":"радость","title":null,"suggestions":null}"#).unwrap();
        assert_eq!(result.emotion, "радость");
        assert!(result.title.is_empty());
        assert!(result.suggestions.is_empty());
    }

    #[test]
    fn test_fallback_shape() {
        let result = AnalysisResult::fallback("просто текст", InputMode::Video);
        assert!(result.is_unknown());
        assert_eq!(result.title, "Состояние");
        assert_eq!(result.analysis, "просто текст");
        assert!(result.suggestions.is_empty());
    }
}
