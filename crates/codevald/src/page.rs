//! Server-rendered HTML. Every piece of user or model text passes through
//! [`escape_html`].

use codeval_core::reporting::{format_mean, format_score, outcome_note};
use codeval_core::AggregateReport;

/// Code shown in the form on first load.
pub const SAMPLE_CODE: &str = "int fibonacci(int n) {
    if (n <= 1) return n;
    return fibonacci(n-1) + fibonacci(n-2);
}";

/// Warning shown instead of a report for an empty submission.
pub const BLANK_WARNING: &str = "Please enter some code to evaluate";

const STYLE: &str = "body{font-family:sans-serif;max-width:1100px;margin:2em auto;padding:0 1em}\
textarea{width:100%;font-family:monospace}\
.columns{display:flex;gap:1.5em}.column{flex:1}\
.warning{background:#fff3cd;padding:.75em}\
.average{font-size:2em}";

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Code Evaluator</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>Code Evaluator</h1>\n\
         <p>Scores C++ code for time complexity, space complexity and readability.</p>\n\
         {body}</body>\n</html>\n"
    )
}

fn form(code: &str) -> String {
    format!(
        "<form method=\"post\" action=\"/evaluate\">\n\
         <label for=\"code\">Enter your C++ code:</label>\n\
         <textarea id=\"code\" name=\"code\" rows=\"15\">{}</textarea>\n\
         <button type=\"submit\">Evaluate Code</button>\n</form>\n",
        escape_html(code)
    )
}

/// The input form, with an optional warning above it.
pub fn render_form(code: &str, warning: Option<&str>) -> String {
    let mut body = String::new();
    if let Some(warning) = warning {
        body.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            escape_html(warning)
        ));
    }
    body.push_str(&form(code));
    layout(&body)
}

/// The form followed by the evaluation report.
pub fn render_report(code: &str, report: &AggregateReport) -> String {
    let mut body = form(code);
    body.push_str("<h2>Evaluation Complete</h2>\n<div class=\"columns\">\n");
    for result in report.results() {
        body.push_str(&format!(
            "<div class=\"column\">\n<h3>{}</h3>\n<p>{}</p>\n\
             <p><strong>Score: {}/10</strong>{}</p>\n</div>\n",
            escape_html(result.perspective.title()),
            escape_html(&result.feedback),
            format_score(result.score),
            escape_html(outcome_note(result.outcome))
        ));
    }
    body.push_str("</div>\n<hr>\n<h2>Final Summary</h2>\n<ul>\n");
    for result in report.results() {
        body.push_str(&format!(
            "<li>{}: {}/10</li>\n",
            escape_html(result.perspective.title()),
            format_score(result.score)
        ));
    }
    body.push_str(&format!(
        "</ul>\n<p>{}</p>\n\
         <h3>Average Score: <span class=\"average\" style=\"color:{}\">{}/10</span></h3>\n",
        escape_html(report.summary()),
        report.color().css(),
        format_mean(report.mean_score())
    ));
    layout(&body)
}
