//! Multimodal completion service client.
//!
//! Sends a system instruction plus a user message (plain text or mixed
//! text/image parts) to an OpenAI-compatible chat completions endpoint and
//! returns the text of the first choice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{MoodError, MoodResult};

/// Default chat completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model with vision support.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 500;

/// Reply used when the service returns no content at all.
const EMPTY_REPLY: &str = "{}";

/// One completion call: system instruction and user content.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: UserContent,
}

/// User message content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A segment of a multimodal user message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ContentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageRef },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRef {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageRef { url: url.into() },
        }
    }
}

/// An external service that turns a prompt into a single text completion.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Issue one completion call and return the trimmed reply text.
    async fn complete(&self, request: &CompletionRequest) -> MoodResult<String>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent<'a> {
    System(&'a str),
    User(&'a UserContent),
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the OpenAI chat completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    model: String,
    api_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("model", &self.model)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a new client with the given API key, model and endpoint.
    pub fn new(api_key: &str, model: &str, api_url: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            api_url: api_url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from configuration. Fails when no credential is set.
    pub fn from_config(config: &Config) -> MoodResult<Self> {
        let api_key = config.api_key.as_deref().ok_or(MoodError::MissingCredential)?;
        Ok(Self::new(api_key, &config.model, &config.api_url))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> MoodResult<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::System(&request.system),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::User(&request.user),
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        debug!(model = %self.model, "Calling chat completions API");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(MoodError::upstream(status.as_u16(), &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string());

        debug!(len = content.len(), "Completion received");
        Ok(content)
    }
}
