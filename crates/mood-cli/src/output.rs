//! Terminal output formatting.

use colored::Colorize;
use mood_core::glyph::{glyph_for, ERROR_GLYPH};
use mood_core::{AnalysisResult, InputMode};

/// Title shown when the model left the title empty.
fn default_title(mode: InputMode) -> &'static str {
    match mode {
        InputMode::Text => "Ваше эмоциональное состояние",
        InputMode::Video => "Эмоциональное состояние",
    }
}

/// Print an analysis result.
pub fn print_result(result: &AnalysisResult, mode: InputMode) {
    let title = if result.title.is_empty() {
        default_title(mode)
    } else {
        result.title.as_str()
    };

    println!();
    println!("{}  {}", glyph_for(&result.emotion), title.cyan().bold());
    if !result.emotion.is_empty() {
        println!("{}: {}", "Эмоция".bold(), result.emotion.yellow());
    }
    println!();

    if !result.analysis.is_empty() {
        println!("{}", result.analysis);
        println!();
    }

    if !result.suggestions.is_empty() {
        println!("{}", "Рекомендации:".bold());
        for (i, suggestion) in result.suggestions.iter().enumerate() {
            println!("  {}. {}", i + 1, suggestion);
        }
        println!();
    }
}

/// Print an error panel with a remediation hint.
pub fn print_error(message: &str) {
    println!();
    println!("{}  {}", ERROR_GLYPH, "Не удалось проанализировать".red().bold());
    println!();
    println!("{}", message);
    println!();
    println!(
        "{} {}",
        "Что сделать:".bold(),
        "Проверьте, что в .env указан корректный OPENAI_API_KEY.".dimmed()
    );
}
