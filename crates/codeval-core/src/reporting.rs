//! Text renderings of an [`AggregateReport`] for terminals and files.

use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::{AggregateReport, EvaluationOutcome};

/// A perspective score, one decimal place.
pub fn format_score(score: f64) -> String {
    format!("{score:.1}")
}

/// The mean score, two decimal places.
pub fn format_mean(mean: f64) -> String {
    format!("{mean:.2}")
}

/// Suffix flagging a score that came from the fallback policy; empty when
/// the model supplied the score.
pub fn outcome_note(outcome: EvaluationOutcome) -> &'static str {
    match outcome {
        EvaluationOutcome::Scored => "",
        EvaluationOutcome::Unparsed => " (no score in response)",
        EvaluationOutcome::Failed => " (evaluation failed)",
    }
}

/// Render the report as Markdown.
pub fn render_report_md(report: &AggregateReport) -> String {
    let mut out = String::new();
    out.push_str("# Code Evaluation\n\n");

    for result in report.results() {
        out.push_str(&format!("## {}\n", result.perspective.title()));
        out.push_str(&format!(
            "Score: {}/10{}\n\n",
            format_score(result.score),
            outcome_note(result.outcome)
        ));
        out.push_str(result.feedback.trim());
        out.push_str("\n\n");
    }

    out.push_str("## Overall\n");
    out.push_str(&format!(
        "Mean score: {}/10 ({})\n\n{}\n",
        format_mean(report.mean_score()),
        report.quality(),
        report.summary()
    ));
    if report.degraded_count() > 0 {
        out.push_str(&format!(
            "\n{} of {} perspectives fell back to a score of 0.\n",
            report.degraded_count(),
            report.results().len()
        ));
    }
    out
}

/// Write the report as pretty JSON.
pub fn write_report_json(path: &Path, report: &AggregateReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report).context("serialize report")?;
    std::fs::write(path, content).with_context(|| format!("write {:?}", path))?;
    Ok(())
}
