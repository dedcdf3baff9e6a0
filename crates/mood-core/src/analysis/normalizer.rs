//! Builds completion requests from analysis input.
//!
//! Enforces the input limits and fixes the JSON shape the model is asked to
//! answer with.

use base64::Engine;

use super::model::AnalysisRequest;
use crate::completion::{CompletionRequest, ContentPart, UserContent};

/// Maximum number of characters of user text sent upstream.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Maximum number of images sent upstream.
pub const MAX_IMAGES: usize = 5;

const DATA_URL_PREFIX: &str = "data:";
const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// System instruction for free-text input.
pub const TEXT_SYSTEM_PROMPT: &str = r#"Ты добрый психолог, помогающий участникам соревнований FTC (First Tech Challenge) — робототехнических соревнований для школьников и студентов.

Твоя задача: на основе короткого текста пользователя определить его эмоциональное состояние и дать краткие, практичные рекомендации.

Отвечай СТРОГО в формате JSON:
{
  "emotion": "название главной эмоции одним словом",
  "title": "краткий заголовок состояния (2-5 слов)",
  "analysis": "2-3 предложения о том, что пользователь, вероятно, чувствует, с эмпатией",
  "suggestions": ["рекомендация 1", "рекомендация 2", "рекомендация 3"]
}

Пиши на русском. Будь тёплым и поддерживающим. Рекомендации должны быть конкретными и выполнимыми (перерывы, дыхание, разговор с командой и т.д.)."#;

/// System instruction for camera or video frames.
pub const VIDEO_SYSTEM_PROMPT: &str = r#"Ты добрый психолог, помогающий участникам соревнований FTC. Твоя задача: по кадрам с лицом человека определить его эмоциональное состояние (мимика, выражение лица) и дать краткие рекомендации.

Отвечай СТРОГО в формате JSON:
{
  "emotion": "название главной эмоции одним словом",
  "title": "краткий заголовок (2-5 слов)",
  "analysis": "2-3 предложения о наблюдаемом состоянии, с эмпатией",
  "suggestions": ["рекомендация 1", "рекомендация 2", "рекомендация 3"]
}

Пиши на русском. Будь тёплым. Если лицо не видно или изображение нечёткое — напиши об этом в analysis."#;

/// Instruction that precedes the frames in the user message.
pub const VIDEO_USER_INSTRUCTION: &str =
    "Проанализируй эмоциональное состояние человека на этих кадрах. Определи главную эмоцию и дай рекомендации.";

/// Build the completion request for an analysis request.
pub fn build(request: &AnalysisRequest) -> CompletionRequest {
    match request {
        AnalysisRequest::Text(text) => build_text(text),
        AnalysisRequest::Images(images) => build_images(images),
    }
}

/// Text mode: the truncated text is the sole user message.
pub fn build_text(text: &str) -> CompletionRequest {
    CompletionRequest {
        system: TEXT_SYSTEM_PROMPT.to_string(),
        user: UserContent::Text(truncate_chars(text, MAX_TEXT_CHARS).to_string()),
    }
}

/// Image mode: one instruction part followed by up to [`MAX_IMAGES`] images in input order.
pub fn build_images<S: AsRef<str>>(images: &[S]) -> CompletionRequest {
    let mut parts = Vec::with_capacity(1 + images.len().min(MAX_IMAGES));
    parts.push(ContentPart::text(VIDEO_USER_INSTRUCTION));
    parts.extend(
        images
            .iter()
            .take(MAX_IMAGES)
            .map(|img| ContentPart::image(to_data_url(img.as_ref()))),
    );

    CompletionRequest {
        system: VIDEO_SYSTEM_PROMPT.to_string(),
        user: UserContent::Parts(parts),
    }
}

/// Coerce an image payload into a data URL, treating bare payloads as base64 JPEG.
pub fn to_data_url(image: &str) -> String {
    if image.starts_with(DATA_URL_PREFIX) {
        image.to_string()
    } else {
        format!("{}{}", JPEG_DATA_URL_PREFIX, image)
    }
}

/// Encode raw JPEG bytes as a data URL.
pub fn jpeg_data_url(bytes: &[u8]) -> String {
    let b64 = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("{}{}", JPEG_DATA_URL_PREFIX, b64)
}

/// First `max` characters of `text`, on a char boundary.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
