//! One-shot analysis commands.

use anyhow::{Context, Result};
use base64::Engine;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;

use mood_core::frames::{extract_frames, FfmpegFrameSource};
use mood_core::{AnalysisRequest, Analyzer, Config, OpenAiClient};

use crate::output;

#[derive(Subcommand)]
pub enum AnalyzeCommands {
    /// Analyze how a short text sounds
    Text(TextArgs),

    /// Analyze facial expression on JPEG images
    Image(ImageArgs),

    /// Analyze frames sampled from a video file (requires ffmpeg)
    Video(VideoArgs),
}

#[derive(Args)]
pub struct TextArgs {
    /// How you feel, in your own words
    pub text: String,
}

#[derive(Args)]
pub struct ImageArgs {
    /// JPEG files, at most 5 are used
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Args)]
pub struct VideoArgs {
    /// Video file to sample frames from
    pub file: PathBuf,
}

pub async fn execute(cmd: AnalyzeCommands, config: Config) -> Result<()> {
    if let Err(e) = run(cmd, &config).await {
        tracing::debug!(error = ?e, "Analysis failed");
        output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cmd: AnalyzeCommands, config: &Config) -> Result<()> {
    let analyzer = Analyzer::new(Arc::new(OpenAiClient::from_config(config)?));

    let request = match cmd {
        AnalyzeCommands::Text(args) => AnalysisRequest::text(args.text.trim())?,
        AnalyzeCommands::Image(args) => AnalysisRequest::images(read_images(&args.files)?)?,
        AnalyzeCommands::Video(args) => {
            println!("{} Sampling frames from {}", "→".dimmed(), args.file.display());
            let mut source = FfmpegFrameSource::new(args.file);
            let frames = tokio::task::spawn_blocking(move || extract_frames(&mut source))
                .await
                .context("Frame extraction task failed")??;
            println!("{} {} frame(s) extracted", "✓".green().bold(), frames.len());
            AnalysisRequest::images(frames)?
        }
    };

    println!("{} Analyzing...", "→".dimmed());
    let result = analyzer.analyze(&request).await?;
    output::print_result(&result, request.mode());
    Ok(())
}

/// Read image files as base64 payloads.
fn read_images(files: &[PathBuf]) -> Result<Vec<String>> {
    files
        .iter()
        .take(mood_core::analysis::normalizer::MAX_IMAGES)
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
        })
        .collect()
}
