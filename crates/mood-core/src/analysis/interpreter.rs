//! Tolerant interpretation of model replies.

use super::model::{AnalysisResult, InputMode};

/// Outcome of interpreting a reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpretation {
    /// The reply was a JSON object of the expected shape.
    Parsed(AnalysisResult),
    /// The reply was not usable JSON; holds the trimmed reply text.
    Fallback(String),
}

impl Interpretation {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Interpretation::Fallback(_))
    }

    /// Collapse into a result, synthesizing the fallback for `mode`.
    pub fn into_result(self, mode: InputMode) -> AnalysisResult {
        match self {
            Interpretation::Parsed(result) => result,
            Interpretation::Fallback(raw) => AnalysisResult::fallback(raw, mode),
        }
    }
}

/// Strictly parse a reply as an [`AnalysisResult`].
///
/// Never fails: anything that does not deserialize becomes a fallback that
/// keeps the reply text.
pub fn interpret(reply: &str) -> Interpretation {
    let trimmed = reply.trim();
    match serde_json::from_str::<AnalysisResult>(trimmed) {
        Ok(result) => Interpretation::Parsed(result),
        Err(e) => {
            tracing::debug!(error = %e, "Reply is not analysis JSON, using fallback");
            Interpretation::Fallback(trimmed.to_string())
        }
    }
}
