//! Best-effort extraction of score and feedback from a model response.
//!
//! Score rule: the first `Score` label (case-insensitive, optionally wrapped
//! in Markdown emphasis) followed by `:` or `=` and a decimal number. An
//! optional `/10` suffix is ignored. The value is clamped to `[0, 10]`.
//!
//! Feedback rule: the text before the score label, minus a leading
//! `Feedback:` label. Emphasis opening the label (`**Score`) is not part of
//! the feedback; emphasis closing the feedback itself is kept. Without a
//! score label the whole response is feedback.
//!
//! A response without a readable score yields an `Unparsed` result with the
//! fallback score; this never fails.

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{EvaluationResult, Perspective, MAX_SCORE, MIN_SCORE};

/// Feedback shown when the model returned no prose at all.
pub const EMPTY_FEEDBACK: &str = "No feedback provided.";

fn score_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)\bscore\b\s*\**\s*[:=]\s*\**\s*(-?\d+(?:\.\d+)?)")
            .expect("score pattern is valid")
    })
}

fn feedback_label() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*\**\s*feedback\s*\**\s*:\s*\**").expect("feedback pattern is valid")
    })
}

/// Score and feedback read from one response.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    /// `None` when no score could be located.
    pub score: Option<f64>,
    pub feedback: String,
}

impl ParsedResponse {
    /// Turn into a result, applying the fallback policy when unscored.
    pub fn into_result(self, perspective: Perspective) -> EvaluationResult {
        match self.score {
            Some(score) => EvaluationResult::scored(perspective, score, self.feedback),
            None => EvaluationResult::unparsed(perspective, self.feedback),
        }
    }
}

/// Parse a raw model response.
pub fn parse_response(response: &str) -> ParsedResponse {
    let found = score_pattern().captures(response).and_then(|caps| {
        let whole = caps.get(0)?;
        let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
        let cut = label_start(response, whole.start());
        value
            .is_finite()
            .then(|| (cut, value.clamp(MIN_SCORE, MAX_SCORE)))
    });

    match found {
        Some((cut, score)) => ParsedResponse {
            score: Some(score),
            feedback: clean_feedback(&response[..cut]),
        },
        None => ParsedResponse {
            score: None,
            feedback: clean_feedback(response),
        },
    }
}

/// Extend the match at `word_start` back over emphasis markers that open the
/// label, e.g. the `**` of `**Score:**`. A `*` run glued to a preceding word
/// closes that word's emphasis instead and stays with the feedback.
fn label_start(response: &str, word_start: usize) -> usize {
    let before = &response[..word_start];
    let stars = before.trim_end_matches('*');
    let opens_label = stars.is_empty() || stars.ends_with(char::is_whitespace);
    if opens_label {
        stars.len()
    } else {
        word_start
    }
}

fn clean_feedback(raw: &str) -> String {
    let without_label = feedback_label().replace(raw, "");
    let text = without_label.trim();
    if text.is_empty() {
        EMPTY_FEEDBACK.to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EvaluationOutcome;

    #[test]
    fn test_parses_requested_format() {
        let parsed = parse_response(
            "Feedback: Linear time, a single pass over the input.\nScore: 8",
        );
        assert_eq!(parsed.score, Some(8.0));
        assert_eq!(parsed.feedback, "Linear time, a single pass over the input.");
    }

    #[test]
    fn test_parses_markdown_and_out_of_ten() {
        let parsed = parse_response("**Feedback:** Clear names.\n\n**Score:** 7.5/10");
        assert_eq!(parsed.score, Some(7.5));
        assert_eq!(parsed.feedback, "Clear names.");
    }

    #[test]
    fn test_label_is_case_insensitive_and_accepts_equals() {
        assert_eq!(parse_response("SCORE = 9").score, Some(9.0));
        assert_eq!(parse_response("score:6 because").score, Some(6.0));
    }

    #[test]
    fn test_first_score_label_wins() {
        let parsed = parse_response("Feedback: ok\nScore: 4\nRevised score: 9");
        assert_eq!(parsed.score, Some(4.0));
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(parse_response("Score: 15").score, Some(10.0));
        assert_eq!(parse_response("Score: -2").score, Some(0.0));
    }

    #[test]
    fn test_words_containing_score_do_not_match() {
        let parsed = parse_response("The underscore: 5 is unusual. No rating given.");
        assert_eq!(parsed.score, None);
    }

    #[test]
    fn test_missing_score_is_unparsed_with_full_feedback() {
        let parsed = parse_response("Feedback: Looks fine to me.");
        assert_eq!(parsed.score, None);
        assert_eq!(parsed.feedback, "Looks fine to me.");

        let result = parsed.into_result(Perspective::Readability);
        assert_eq!(result.outcome, EvaluationOutcome::Unparsed);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_score_without_number_is_unparsed() {
        assert_eq!(parse_response("Score: N/A").score, None);
    }

    #[test]
    fn test_empty_feedback_gets_placeholder() {
        let parsed = parse_response("Score: 10");
        assert_eq!(parsed.feedback, EMPTY_FEEDBACK);
        assert_eq!(parse_response("   ").feedback, EMPTY_FEEDBACK);
    }

    #[test]
    fn test_into_result_scored() {
        let result =
            parse_response("Feedback: good\nScore: 8").into_result(Perspective::TimeComplexity);
        assert_eq!(result.perspective, Perspective::TimeComplexity);
        assert_eq!(result.outcome, EvaluationOutcome::Scored);
        assert_eq!(result.score, 8.0);
        assert_eq!(result.feedback, "good");
    }

    #[test]
    fn test_feedback_keeps_closing_emphasis() {
        let parsed = parse_response("Feedback: Uses **memoization**\nScore: 5");
        assert_eq!(parsed.score, Some(5.0));
        assert_eq!(parsed.feedback, "Uses **memoization**");

        let parsed = parse_response("Feedback: Mostly *fine* **Score:** 6");
        assert_eq!(parsed.score, Some(6.0));
        assert_eq!(parsed.feedback, "Mostly *fine*");
    }
}
