//! Mood Core Library
//!
//! Domain model and analysis pipeline for the emotional-state assistant:
//! input normalization, the completion service client, tolerant parsing of
//! model replies, frame sampling and presentation helpers.

pub mod analysis;
pub mod completion;
pub mod config;
pub mod error;
pub mod frames;
pub mod glyph;
pub mod session;

pub use analysis::model::{AnalysisRequest, AnalysisResult, InputMode};
pub use analysis::Analyzer;
pub use completion::{CompletionService, OpenAiClient};
pub use config::Config;
pub use error::{MoodError, MoodResult};
