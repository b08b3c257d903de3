//! UI utilities for the CLI

use colored::*;
use crossterm::terminal::size;

use crate::report::{clean_model_name, ReportMode};

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(67, terminal_width.saturating_sub(4)).max(40);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let title = "RAG Eval - Retrieval-Augmented Generation Harness";
    println!(
        "{}{}{}{}",
        "│  ".blue(),
        title.blue().bold(),
        " ".repeat(banner_width.saturating_sub(title.chars().count() + 4)),
        "│".blue()
    );

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
}

/// Print what the run is about to do
pub fn print_run_plan(question_count: usize, models: &[String], mode: &ReportMode) {
    let names: Vec<&str> = models.iter().map(|m| clean_model_name(m)).collect();
    println!("{} {} questions", "❓".cyan(), question_count);
    println!("{} Models: {}", "🤖".cyan(), names.join(", ").bold());

    match mode {
        ReportMode::File { output_dir } => {
            println!("{} Report directory: {}", "📁".cyan(), output_dir.display())
        }
        ReportMode::Console { max_length } => {
            println!(
                "{} Console report, answers capped at {} characters",
                "🖥️".cyan(),
                max_length
            )
        }
    }
}
