//! Evaluation report rendering
//!
//! File mode writes the full answers to a dated markdown file. Console mode
//! prints the same structure with each answer capped at a maximum length.

use chrono::{Local, NaiveDateTime};
use colored::*;
use std::borrow::Cow;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rag_eval_core::{QuestionResult, Result};

pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_MAX_LENGTH: usize = 250;
pub const TRUNCATION_MARKER: &str = " [...truncated...]";

/// Where a report goes. The two modes are exclusive for a single render.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportMode {
    File { output_dir: PathBuf },
    Console { max_length: usize },
}

impl Default for ReportMode {
    fn default() -> Self {
        ReportMode::File {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Render results in the given mode. Returns the report path in file mode.
pub fn render(results: &[QuestionResult], mode: &ReportMode) -> Result<Option<PathBuf>> {
    match mode {
        ReportMode::File { output_dir } => write_evaluation_results(results, output_dir).map(Some),
        ReportMode::Console { max_length } => {
            print_evaluation_results(results, *max_length);
            Ok(None)
        }
    }
}

/// Last `/`-separated segment of a model id
pub fn clean_model_name(model: &str) -> &str {
    model.rsplit('/').next().unwrap_or(model)
}

/// Cap an answer at `max_length` characters.
///
/// Cuts after the last period inside the cap when that period sits at or past
/// the middle of the cap, otherwise cuts hard at the cap.
pub fn truncate_answer(answer: &str, max_length: usize) -> Cow<'_, str> {
    let cut = match answer.char_indices().nth(max_length) {
        Some((byte_idx, _)) => byte_idx,
        None => return Cow::Borrowed(answer),
    };

    let head = &answer[..cut];
    if let Some(period) = head.rfind('.') {
        let period_idx = head[..period].chars().count();
        if period_idx * 2 >= max_length {
            return Cow::Owned(format!("{}{}", &head[..=period], TRUNCATION_MARKER));
        }
    }

    Cow::Owned(format!("{}{}", head, TRUNCATION_MARKER))
}

/// `YYYYMMDD_HHMMSS_rag_results.md`
pub fn report_filename(generated_at: &NaiveDateTime) -> String {
    format!("{}_rag_results.md", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Render the markdown report body
pub fn render_markdown(results: &[QuestionResult], generated_at: &NaiveDateTime) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        out,
        "# RAG System Evaluation Results\n\nGenerated on: {}\n\n---\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    );

    for (idx, result) in results.iter().enumerate() {
        let _ = write!(out, "## Question #{}: {}\n\n", idx + 1, result.question);
        let _ = write!(out, "**Documents Retrieved:** {}\n\n", result.documents.len());

        for (model, answer) in result.model_responses.iter() {
            let _ = write!(out, "### Model: {}\n\n", clean_model_name(model));
            let _ = write!(out, "{}\n\n", answer);
            out.push_str("---\n\n");
        }

        if idx + 1 < results.len() {
            out.push_str("---\n\n");
        }
    }

    out
}

/// Write the evaluation results to a dated markdown file under `output_dir`
pub fn write_evaluation_results(
    results: &[QuestionResult],
    output_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    let generated_at = Local::now().naive_local();
    let filepath = output_dir.join(report_filename(&generated_at));

    fs::create_dir_all(output_dir)?;

    let mut writer = BufWriter::new(File::create(&filepath)?);
    writer.write_all(render_markdown(results, &generated_at).as_bytes())?;
    writer.flush()?;

    tracing::info!(path = %filepath.display(), questions = results.len(), "report written");
    println!("{} Results written to: {}", "✅".green(), filepath.display());
    Ok(filepath)
}

/// Render the condensed console report, capping each answer at `max_length`
pub fn render_console(results: &[QuestionResult], max_length: usize) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "\n\n{}", "✨".repeat(30));
    out.push_str("📊  EVALUATION RESULTS SUMMARY  📊\n");
    let _ = writeln!(out, "{}", "✨".repeat(30));

    for (idx, result) in results.iter().enumerate() {
        let _ = writeln!(out, "\n\n📝 QUESTION #{}: {}", idx + 1, result.question);
        let _ = writeln!(out, "{}", "=".repeat(80));
        let _ = writeln!(out, "📚 Retrieved {} documents", result.documents.len());

        for (model, answer) in result.model_responses.iter() {
            let _ = writeln!(out, "\n🤖 MODEL: {}", clean_model_name(model));
            let _ = writeln!(out, "{}", "-".repeat(60));
            let _ = writeln!(out, "{}", truncate_answer(answer, max_length));
            let _ = writeln!(out, "{}", "-".repeat(60));
        }

        if idx + 1 < results.len() {
            let _ = writeln!(out, "\n{}", "•".repeat(80));
        }
    }

    let _ = writeln!(out, "\n{}", "🏁".repeat(20));
    out.push_str("End of results\n");
    let _ = writeln!(out, "{}", "🏁".repeat(20));

    out
}

/// Print a condensed report to the console
pub fn print_evaluation_results(results: &[QuestionResult], max_length: usize) {
    println!("{}", render_console(results, max_length));
}
