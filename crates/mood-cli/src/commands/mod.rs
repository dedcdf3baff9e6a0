//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mood_core::Config;

pub mod analyze;
pub mod serve;

/// Empathetic emotional-state assistant
#[derive(Parser)]
#[command(name = "mood")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Key-value file with OPENAI_API_KEY and friends
    #[arg(long, global = true, default_value = ".env")]
    pub env_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve(serve::ServeArgs),

    /// Analyze text, images or a video from the terminal
    #[command(subcommand)]
    Analyze(analyze::AnalyzeCommands),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(Some(self.env_file.as_path()))?;
        tracing::debug!(?config, "Configuration loaded");

        match self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Analyze(cmd) => analyze::execute(cmd, config).await,
        }
    }
}
