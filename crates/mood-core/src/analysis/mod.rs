//! Emotional-state analysis pipeline.
//!
//! `AnalysisRequest` → [`normalizer::build`] → [`CompletionService`] →
//! [`interpreter::interpret`] → `AnalysisResult`.

pub mod interpreter;
pub mod model;
pub mod normalizer;

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::completion::CompletionService;
use crate::error::MoodResult;
use interpreter::Interpretation;
use model::{AnalysisRequest, AnalysisResult};

/// Runs analysis requests against a completion service.
#[derive(Clone)]
pub struct Analyzer {
    service: Arc<dyn CompletionService>,
}

impl Analyzer {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Analyze one request with a single completion call.
    ///
    /// Transport and upstream failures are returned as errors; a reply that
    /// is not the expected JSON still yields a result.
    #[instrument(skip_all, fields(mode = request.mode().as_str()))]
    pub async fn analyze(&self, request: &AnalysisRequest) -> MoodResult<AnalysisResult> {
        let prompt = normalizer::build(request);
        let reply = self.service.complete(&prompt).await?;

        let interpretation = interpreter::interpret(&reply);
        if let Interpretation::Fallback(raw) = &interpretation {
            warn!(len = raw.len(), "Model reply was not JSON, returning fallback result");
        }

        let result = interpretation.into_result(request.mode());
        info!(emotion = %result.emotion, suggestions = result.suggestions.len(), "Analysis complete");
        Ok(result)
    }

    pub async fn analyze_text(&self, text: &str) -> MoodResult<AnalysisResult> {
        self.analyze(&AnalysisRequest::text(text)?).await
    }

    pub async fn analyze_images(&self, images: Vec<String>) -> MoodResult<AnalysisResult> {
        self.analyze(&AnalysisRequest::images(images)?).await
    }
}
