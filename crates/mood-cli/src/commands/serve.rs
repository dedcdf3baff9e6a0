//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use mood_core::Config;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Directory with the web client
    #[arg(long, default_value = "assets/web")]
    pub root: PathBuf,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path (default: logs/mood.log)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub async fn execute(args: ServeArgs, config: Config) -> Result<()> {
    if !args.root.join(mood_web::INDEX_FILE).is_file() {
        anyhow::bail!(
            "{} not found in {}. Pass --root with the web client directory.",
            mood_web::INDEX_FILE,
            args.root.display()
        );
    }

    println!();
    println!("  {} {}", "Mood".cyan().bold(), "Web Server".bold());
    println!();
    println!("  {}  http://{}:{}", "Client".green(), args.host, args.port);
    println!("  {}     http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}   {}", "Model".green(), config.model);
    match config.masked_key() {
        Some(prefix) => println!("  {}     {}", "Key".green(), prefix),
        None => println!(
            "  {}     {}",
            "Key".yellow(),
            "OPENAI_API_KEY not set, analysis requests will fail".yellow()
        ),
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    mood_web::run_server(config, &args.host, args.port, args.root).await?;

    Ok(())
}
