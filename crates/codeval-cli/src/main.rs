//! codeval - evaluate a code snippet from the command line
//!
//! ## Commands
//!
//! - `evaluate`: score a file (or stdin) from the three perspectives
//! - `prompt`: print the prompt one perspective would send, offline

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use codeval_core::{
    build_prompt, render_report_md, write_report_json, AggregateReport, AppConfig,
    CodeSubmission, EvaluationSettings, Orchestrator, Perspective,
};
use completion_gateway::{CompletionService, GeminiClient};

#[derive(Parser)]
#[command(name = "codeval")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Score code for time/space complexity and readability", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON: log lines and the evaluation report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a source file with the configured model
    Evaluate {
        /// Source file; `-` or omitted reads stdin
        file: Option<PathBuf>,

        /// Also write the report as pretty JSON to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the prompt sent for one perspective (no network, no API key)
    Prompt {
        /// time, space or readability
        #[arg(short, long)]
        perspective: Perspective,

        /// Source file; `-` or omitted reads stdin
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    codeval_core::init_tracing(
        cli.json || codeval_core::telemetry::json_requested_by_env(),
        level,
    );

    match cli.command {
        Commands::Evaluate { file, output } => {
            let (config, code) = evaluate_inputs(load_config, file.as_deref())?;
            let client = GeminiClient::new(config.gemini_config())
                .context("Failed to build the completion client")?;
            let out = cmd_evaluate(
                Arc::new(client),
                config.evaluation_settings(),
                &code,
                cli.json,
                output.as_deref(),
            )
            .await?;
            print!("{out}");
            Ok(())
        }
        Commands::Prompt { perspective, file } => {
            let code = read_source(file.as_deref())?;
            println!("{}", cmd_prompt(perspective, &code));
            Ok(())
        }
    }
}

fn load_config() -> Result<AppConfig> {
    if let Ok(cwd) = std::env::current_dir() {
        codeval_core::load_env_files(&cwd);
    }
    AppConfig::from_env().context("Failed to load configuration")
}

/// Configuration first, then the source: a missing credential must fail
/// before stdin is read.
fn evaluate_inputs<C>(config: C, file: Option<&Path>) -> Result<(AppConfig, String)>
where
    C: FnOnce() -> Result<AppConfig>,
{
    let config = config()?;
    let code = read_source(file)?;
    Ok((config, code))
}

/// Read the submission from `file`, or stdin for `None` / `-`.
fn read_source(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
        }
        _ => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("Failed to read stdin")?;
            Ok(code)
        }
    }
}

async fn cmd_evaluate(
    service: Arc<dyn CompletionService>,
    settings: EvaluationSettings,
    code: &str,
    json: bool,
    output: Option<&Path>,
) -> Result<String> {
    let submission = CodeSubmission::new(code);
    if submission.is_blank() {
        bail!("Please enter some code to evaluate");
    }

    let orchestrator = Orchestrator::new(service, settings);
    let report = orchestrator.evaluate(&submission).await;
    info!(
        evaluation_id = %report.evaluation_id(),
        mean_score = report.mean_score(),
        "evaluation complete"
    );

    if let Some(path) = output {
        write_report_json(path, &report)?;
    }
    render(&report, json)
}

fn render(report: &AggregateReport, json: bool) -> Result<String> {
    if json {
        let mut out = serde_json::to_string_pretty(report).context("serialize report")?;
        out.push('\n');
        Ok(out)
    } else {
        Ok(render_report_md(report))
    }
}

fn cmd_prompt(perspective: Perspective, code: &str) -> String {
    build_prompt(&CodeSubmission::new(code), perspective)
}
