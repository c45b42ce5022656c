//! End-to-end orchestration tests against in-memory completion services.

use std::sync::Arc;
use std::time::Duration;

use codeval_core::{
    build_prompt, CodeSubmission, EvaluationOutcome, EvaluationSettings, Orchestrator,
    Perspective, QualityBand, ScoreColor,
};
use completion_gateway::fakes::{FailingCompletion, ScriptedCompletion, SlowCompletion};

const ADD: &str = "int add(int a,int b){return a+b;}";

fn scripted(time: &str, space: &str, readability: &str) -> ScriptedCompletion {
    ScriptedCompletion::new("Feedback: unexpected prompt\nScore: 1")
        .when("time complexity", time)
        .when("space complexity", space)
        .when("readability", readability)
}

fn orchestrator(service: Arc<ScriptedCompletion>) -> Orchestrator {
    Orchestrator::new(service, EvaluationSettings::default())
}

#[tokio::test]
async fn all_three_scored_gives_their_mean() {
    let service = Arc::new(scripted(
        "Feedback: Linear.\nScore: 8",
        "Feedback: Linear memory.\nScore: 6",
        "Feedback: Very clear.\nScore: 10",
    ));
    let report = orchestrator(service.clone())
        .evaluate(&CodeSubmission::new(ADD))
        .await;

    assert_eq!(report.results().len(), 3);
    assert_eq!(report.mean_score(), 8.0);
    assert_eq!(report.quality(), QualityBand::Excellent);
    assert_eq!(report.color(), ScoreColor::Green);
    assert_eq!(report.degraded_count(), 0);
    assert_eq!(
        report.result(Perspective::TimeComplexity).unwrap().feedback,
        "Linear."
    );
}

#[tokio::test]
async fn unparsed_response_counts_as_zero() {
    let service = Arc::new(scripted(
        "Feedback: Linear.\nScore: 8",
        "I would rather not give a number.",
        "Score: 10",
    ));
    let report = orchestrator(service)
        .evaluate(&CodeSubmission::new(ADD))
        .await;

    let space = report.result(Perspective::SpaceComplexity).unwrap();
    assert_eq!(space.outcome, EvaluationOutcome::Unparsed);
    assert_eq!(space.score, 0.0);
    assert_eq!(space.feedback, "I would rather not give a number.");
    assert_eq!(report.mean_score(), 6.0);
    assert_eq!(report.quality(), QualityBand::Good);
}

#[tokio::test]
async fn one_failing_perspective_leaves_others_scored() {
    let service = Arc::new(
        ScriptedCompletion::new("Score: 1")
            .fail_when("readability", 503)
            .when("time complexity", "Score: 9")
            .when("space complexity", "Score: 6"),
    );
    let report = orchestrator(service)
        .evaluate(&CodeSubmission::new(ADD))
        .await;

    let readability = report.result(Perspective::Readability).unwrap();
    assert_eq!(readability.outcome, EvaluationOutcome::Failed);
    assert_eq!(readability.score, 0.0);
    assert!(readability.feedback.starts_with("Evaluation unavailable:"));

    assert_eq!(report.result(Perspective::TimeComplexity).unwrap().score, 9.0);
    assert_eq!(report.result(Perspective::SpaceComplexity).unwrap().score, 6.0);
    assert_eq!(report.mean_score(), 5.0);
    assert_eq!(report.degraded_count(), 1);
}

#[tokio::test]
async fn all_perspectives_failing_still_produces_a_report() {
    let orchestrator = Orchestrator::new(
        Arc::new(FailingCompletion::new("connection refused")),
        EvaluationSettings::default(),
    );
    let report = orchestrator.evaluate(&CodeSubmission::new(ADD)).await;

    assert_eq!(report.results().len(), 3);
    assert!(report
        .results()
        .iter()
        .all(|r| r.outcome == EvaluationOutcome::Failed));
    assert_eq!(report.mean_score(), 0.0);
    assert_eq!(report.quality(), QualityBand::Moderate);
    assert_eq!(report.color(), ScoreColor::Red);
}

#[tokio::test(start_paused = true)]
async fn slow_perspective_times_out_alone() {
    let service = Arc::new(SlowCompletion::new(
        "space complexity",
        Duration::from_secs(120),
        "Feedback: fine\nScore: 9",
    ));
    let orchestrator = Orchestrator::new(
        service,
        EvaluationSettings {
            call_timeout: Duration::from_secs(30),
        },
    );
    let report = orchestrator.evaluate(&CodeSubmission::new(ADD)).await;

    let space = report.result(Perspective::SpaceComplexity).unwrap();
    assert_eq!(space.outcome, EvaluationOutcome::Failed);
    assert_eq!(space.feedback, "Evaluation unavailable: no response within 30s");
    assert_eq!(report.result(Perspective::TimeComplexity).unwrap().score, 9.0);
    assert_eq!(report.result(Perspective::Readability).unwrap().score, 9.0);
    assert_eq!(report.mean_score(), 6.0);
}

#[tokio::test]
async fn sends_exactly_one_prompt_per_perspective() {
    let service = Arc::new(ScriptedCompletion::new("Score: 5"));
    let submission = CodeSubmission::new(ADD);
    orchestrator(service.clone()).evaluate(&submission).await;

    let mut sent = service.prompts();
    sent.sort();
    let mut expected: Vec<String> = Perspective::ALL
        .iter()
        .map(|p| build_prompt(&submission, *p))
        .collect();
    expected.sort();
    assert_eq!(sent, expected);
}

#[tokio::test]
async fn report_labels_and_range_for_small_function() {
    let service = Arc::new(ScriptedCompletion::new(
        "**Feedback:** Trivial constant-time addition.\n**Score:** 9/10",
    ));
    let report = orchestrator(service)
        .evaluate(&CodeSubmission::new(ADD))
        .await;

    let titles: Vec<&str> = report
        .results()
        .iter()
        .map(|r| r.perspective.title())
        .collect();
    assert_eq!(titles, vec!["Time Complexity", "Space Complexity", "Readability"]);
    assert!(report.mean_score().is_finite());
    assert!((0.0..=10.0).contains(&report.mean_score()));
    assert_eq!(report.submission_digest(), CodeSubmission::new(ADD).digest());
}

#[tokio::test]
async fn each_evaluation_gets_a_fresh_id() {
    let orchestrator = orchestrator(Arc::new(ScriptedCompletion::new("Score: 5")));
    let submission = CodeSubmission::new(ADD);
    let first = orchestrator.evaluate(&submission).await;
    let second = orchestrator.evaluate(&submission).await;
    assert_ne!(first.evaluation_id(), second.evaluation_id());
    assert_eq!(first.mean_score(), second.mean_score());
}
