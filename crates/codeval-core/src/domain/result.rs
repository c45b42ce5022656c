//! Per-perspective results and the aggregate report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::perspective::Perspective;
use crate::domain::submission::CodeSubmission;

/// Lowest score a perspective can receive.
pub const MIN_SCORE: f64 = 0.0;
/// Highest score a perspective can receive.
pub const MAX_SCORE: f64 = 10.0;
/// Score substituted whenever the fallback policy applies.
pub const FALLBACK_SCORE: f64 = 0.0;

/// How a result's score was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationOutcome {
    /// A score was read from the model's response.
    Scored,
    /// The model answered but no score could be located.
    Unparsed,
    /// The model could not be reached or refused the request.
    Failed,
}

impl EvaluationOutcome {
    /// `true` when the fallback score was substituted.
    pub fn is_degraded(self) -> bool {
        !matches!(self, EvaluationOutcome::Scored)
    }
}

/// The verdict for one perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub perspective: Perspective,
    /// Always within `[MIN_SCORE, MAX_SCORE]`.
    pub score: f64,
    pub feedback: String,
    pub outcome: EvaluationOutcome,
}

impl EvaluationResult {
    pub fn scored(perspective: Perspective, score: f64, feedback: String) -> Self {
        EvaluationResult {
            perspective,
            score: score.clamp(MIN_SCORE, MAX_SCORE),
            feedback,
            outcome: EvaluationOutcome::Scored,
        }
    }

    pub fn unparsed(perspective: Perspective, feedback: String) -> Self {
        EvaluationResult {
            perspective,
            score: FALLBACK_SCORE,
            feedback,
            outcome: EvaluationOutcome::Unparsed,
        }
    }

    pub fn failed(perspective: Perspective, reason: &str) -> Self {
        EvaluationResult {
            perspective,
            score: FALLBACK_SCORE,
            feedback: format!("Evaluation unavailable: {reason}"),
            outcome: EvaluationOutcome::Failed,
        }
    }
}

/// Overall quality verdict derived from the mean score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityBand {
    Excellent,
    Good,
    Moderate,
}

impl QualityBand {
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 8.0 {
            QualityBand::Excellent
        } else if mean >= 6.0 {
            QualityBand::Good
        } else {
            QualityBand::Moderate
        }
    }
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            QualityBand::Excellent => "excellent",
            QualityBand::Good => "good",
            QualityBand::Moderate => "moderate",
        };
        write!(f, "{s}")
    }
}

/// Traffic-light colour for displaying the mean score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreColor {
    Green,
    Orange,
    Red,
}

impl ScoreColor {
    pub fn from_mean(mean: f64) -> Self {
        if mean >= 7.0 {
            ScoreColor::Green
        } else if mean >= 5.0 {
            ScoreColor::Orange
        } else {
            ScoreColor::Red
        }
    }

    /// CSS colour name.
    pub fn css(self) -> &'static str {
        match self {
            ScoreColor::Green => "green",
            ScoreColor::Orange => "orange",
            ScoreColor::Red => "red",
        }
    }
}

/// Results for every perspective plus their mean.
///
/// `mean_score`, `quality` and `summary` are derived from `results` and are
/// recomputed on every change; results can only be changed through
/// [`AggregateReport::replace`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
    evaluation_id: Uuid,
    submission_digest: String,
    generated_at: DateTime<Utc>,
    results: Vec<EvaluationResult>,
    mean_score: f64,
    quality: QualityBand,
    summary: String,
}

impl AggregateReport {
    /// Build a report; results are put into [`Perspective::ALL`] order.
    pub fn new(
        evaluation_id: Uuid,
        submission: &CodeSubmission,
        mut results: Vec<EvaluationResult>,
    ) -> Self {
        results.sort_by_key(|result| result.perspective.index());
        let mut report = AggregateReport {
            evaluation_id,
            submission_digest: submission.digest().to_string(),
            generated_at: Utc::now(),
            results,
            mean_score: FALLBACK_SCORE,
            quality: QualityBand::Moderate,
            summary: String::new(),
        };
        report.recompute();
        report
    }

    /// Replace the result for `result.perspective` (or add it) and
    /// recompute the derived fields.
    pub fn replace(&mut self, result: EvaluationResult) {
        match self
            .results
            .iter_mut()
            .find(|existing| existing.perspective == result.perspective)
        {
            Some(slot) => *slot = result,
            None => {
                self.results.push(result);
                self.results.sort_by_key(|r| r.perspective.index());
            }
        }
        self.recompute();
    }

    fn recompute(&mut self) {
        self.mean_score = mean_score(&self.results);
        self.quality = QualityBand::from_mean(self.mean_score);
        self.summary = format!(
            "The code demonstrates {} quality overall.",
            self.quality
        );
    }

    pub fn evaluation_id(&self) -> Uuid {
        self.evaluation_id
    }

    pub fn submission_digest(&self) -> &str {
        &self.submission_digest
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    pub fn result(&self, perspective: Perspective) -> Option<&EvaluationResult> {
        self.results.iter().find(|r| r.perspective == perspective)
    }

    pub fn mean_score(&self) -> f64 {
        self.mean_score
    }

    pub fn quality(&self) -> QualityBand {
        self.quality
    }

    pub fn color(&self) -> ScoreColor {
        ScoreColor::from_mean(self.mean_score)
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Number of perspectives that fell back to the fallback score.
    pub fn degraded_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.is_degraded())
            .count()
    }
}

/// Arithmetic mean of the scores; fallback scores count as 0.
pub fn mean_score(results: &[EvaluationResult]) -> f64 {
    if results.is_empty() {
        return FALLBACK_SCORE;
    }
    results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
}
