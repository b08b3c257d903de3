//! Report writer and console UI for the RAG evaluation harness

pub mod report;
mod ui;


pub use report::{
    clean_model_name, print_evaluation_results, render, render_console, render_markdown,
    report_filename,
    truncate_answer, write_evaluation_results, ReportMode, DEFAULT_MAX_LENGTH, DEFAULT_OUTPUT_DIR,
    TRUNCATION_MARKER,
};
pub use ui::{display_banner, print_run_plan};

// Re-export core types
pub use rag_eval_core::{Error, Result};
