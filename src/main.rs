use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

// Import from our modular crates
use rag_eval_anthropic::AnthropicClient;
use rag_eval_cli::{
    display_banner, print_run_plan, render, ReportMode, DEFAULT_MAX_LENGTH, DEFAULT_OUTPUT_DIR,
};
use rag_eval_core::DEFAULT_MODEL;
use rag_eval_pipeline::{load_evaluation_set, EvaluationRunner, HttpReranker, RerankConfig};
use rag_eval_quotient::QuotientLogger;

#[derive(Parser)]
#[command(name = "rag-eval")]
#[command(
    about = "Evaluate a retrieval-augmented generation pipeline against one or more models",
    long_about = None
)]
struct Cli {
    /// JSON file with questions and their retrieved documents
    #[arg(short, long)]
    questions: PathBuf,

    /// Model to query (repeatable)
    #[arg(short, long = "model", default_values_t = [DEFAULT_MODEL.to_string()])]
    models: Vec<String>,

    /// Directory for the markdown report
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Print a condensed report to the console instead of writing a file
    #[arg(long)]
    console: bool,

    /// Maximum characters per answer in the console report
    #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Skip hallucination-detection logging
    #[arg(long)]
    no_eval: bool,

    /// Rerank retrieved documents before building the context
    #[arg(long)]
    rerank: bool,

    /// Number of documents kept after reranking
    #[arg(long)]
    top_n: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn report_mode(&self) -> ReportMode {
        if self.console {
            ReportMode::Console { max_length: self.max_length }
        } else {
            ReportMode::File { output_dir: self.output_dir.clone() }
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let items = load_evaluation_set(&cli.questions)
        .with_context(|| format!("failed to load questions from {}", cli.questions.display()))?;

    // Initialize components
    let anthropic = AnthropicClient::from_env()?;
    let mut runner = EvaluationRunner::new(Arc::new(anthropic)).with_models(cli.models.clone());

    if !cli.no_eval {
        let logger = QuotientLogger::from_env()?;
        runner = runner.with_detector(Arc::new(logger));
    }

    if cli.rerank {
        let mut config = RerankConfig::from_env()?;
        if let Some(top_n) = cli.top_n {
            config = config.with_top_n(top_n);
        }
        let reranker = HttpReranker::new(config)?;
        let top_n = reranker.top_n();
        runner = runner.with_reranker(Arc::new(reranker), top_n);
    }

    let mode = cli.report_mode();
    display_banner();
    print_run_plan(items.len(), runner.models(), &mode);

    let results = runner.run(items).await;

    if let Some(path) = render(&results, &mode)? {
        println!("{} Report ready: {}", "📄".green(), path.display().to_string().bold());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["rag-eval", "--questions", "set.json"]).unwrap();
        assert_eq!(cli.models, vec![DEFAULT_MODEL.to_string()]);
        assert_eq!(
            cli.report_mode(),
            ReportMode::File { output_dir: PathBuf::from("output") }
        );
        assert!(!cli.no_eval && !cli.rerank);
    }

    #[test]
    fn test_cli_console_mode_and_models() {
        let cli = Cli::try_parse_from([
            "rag-eval", "-q", "set.json", "--console", "--max-length", "120",
            "-m", "claude-sonnet-4-20250514", "-m", "anthropic/claude-opus-4-20250514",
        ])
        .unwrap();

        assert_eq!(cli.report_mode(), ReportMode::Console { max_length: 120 });
        assert_eq!(cli.models.len(), 2);
    }

    #[test]
    fn test_cli_requires_questions() {
        assert!(Cli::try_parse_from(["rag-eval"]).is_err());
    }
}
