use async_trait::async_trait;
use callsim_core::{
    batch::{
        compute_stats, scoring::parse_analysis_body, AudioFile, AutomationTier, BatchOrchestrator,
        BatchQueue, BatchResult, CallAnalysis, CancelToken, ScoringRequest, ScoringService,
        TranscriptionService,
    },
    error::ServiceError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ── Fakes ───────────────────────────────────────────────────────────────────

/// Transcribes every file to its name, except names listed as failing or silent.
struct FakeTranscriber {
    failing: Vec<&'static str>,
    silent:  Vec<&'static str>,
}

#[async_trait]
impl TranscriptionService for FakeTranscriber {
    async fn transcribe(&self, file: &AudioFile) -> Result<String, ServiceError> {
        if self.failing.contains(&file.name.as_str()) {
            return Err(ServiceError::Server { status: 500, body: "boom".into() });
        }
        if self.silent.contains(&file.name.as_str()) {
            return Ok(String::new());
        }
        Ok(format!("transcript of {}", file.name))
    }
}

/// Scores from a body template and records every request it receives.
struct FakeScorer {
    body:     &'static str,
    failing:  Vec<&'static str>,
    requests: Arc<Mutex<Vec<ScoringRequest>>>,
}

impl FakeScorer {
    fn new(body: &'static str) -> Self {
        Self { body, failing: Vec::new(), requests: Arc::default() }
    }
}

#[async_trait]
impl ScoringService for FakeScorer {
    async fn score(&self, request: &ScoringRequest) -> Result<CallAnalysis, ServiceError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.failing.contains(&request.file_name.as_str()) {
            return Err(ServiceError::Server { status: 502, body: "bad gateway".into() });
        }
        Ok(parse_analysis_body(self.body))
    }
}

const HIGH_SCORE_BODY: &str = r#"{"analysis": {
    "call_type": "Eligibility Check",
    "intent": "Verify coverage",
    "automation_feasibility_score": 91,
    "scoring_breakdown": {
        "automation_tier": "Fully Automatable",
        "estimated_cost_reduction_pct": 80
    }
}}"#;

fn files(names: &[&str]) -> Vec<AudioFile> {
    names.iter().map(|n| AudioFile::new(*n, vec![0u8; 32_000])).collect()
}

fn transcriber() -> FakeTranscriber {
    FakeTranscriber { failing: Vec::new(), silent: Vec::new() }
}

fn result(name: &str, score: u32, tier: AutomationTier, cost_reduction_pct: f64) -> BatchResult {
    BatchResult {
        file_name: name.into(),
        score,
        tier,
        call_type: "Claim Status".into(),
        intent: String::new(),
        cost_reduction_pct,
    }
}

// ── Orchestrator ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_transcription_is_skipped_and_run_completes() {
    let orchestrator = BatchOrchestrator::new(
        FakeTranscriber { failing: vec!["b.wav"], silent: Vec::new() },
        FakeScorer::new(HIGH_SCORE_BODY),
        Duration::ZERO,
    );
    let mut progress = Vec::new();

    let outcome = orchestrator
        .run(&files(&["a.wav", "b.wav", "c.wav"]), &CancelToken::new(), |p| progress.push(p))
        .await;

    assert!(outcome.done);
    assert!(!outcome.cancelled);
    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.results.len(), 2);
    assert_eq!(outcome.results[0].file_name, "a.wav");
    assert_eq!(outcome.results[1].file_name, "c.wav");
    assert_eq!(progress.len(), 3);
    assert_eq!(progress[2].completed, 2);
    assert_eq!(progress[2].total, 3);
}

#[tokio::test]
async fn empty_transcript_and_scoring_failure_are_skipped() {
    let mut scorer = FakeScorer::new(HIGH_SCORE_BODY);
    scorer.failing = vec!["c.mp3"];
    let orchestrator = BatchOrchestrator::new(
        FakeTranscriber { failing: Vec::new(), silent: vec!["b.mp3"] },
        scorer,
        Duration::ZERO,
    );

    let outcome = orchestrator
        .run(&files(&["a.mp3", "b.mp3", "c.mp3"]), &CancelToken::new(), |_| {})
        .await;

    assert!(outcome.done);
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].file_name, "a.mp3");
}

#[tokio::test]
async fn scoring_request_carries_name_and_estimated_duration() {
    let scorer = FakeScorer::new(HIGH_SCORE_BODY);
    let requests = Arc::clone(&scorer.requests);
    let orchestrator = BatchOrchestrator::new(transcriber(), scorer, Duration::ZERO);

    let outcome = orchestrator.run(&files(&["one.wav"]), &CancelToken::new(), |_| {}).await;
    assert_eq!(outcome.results.len(), 1);

    let sent = requests.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].file_name, "one.wav");
    assert_eq!(sent[0].duration_seconds, 2);
    assert_eq!(sent[0].transcript, "transcript of one.wav");

    let r = &outcome.results[0];
    assert_eq!(r.score, 91);
    assert_eq!(r.tier, AutomationTier::FullyAutomatable);
    assert_eq!(r.call_type, "Eligibility Check");
    assert_eq!(r.cost_reduction_pct, 80.0);
}

#[tokio::test]
async fn cancel_before_start_yields_no_results() {
    let orchestrator =
        BatchOrchestrator::new(transcriber(), FakeScorer::new(HIGH_SCORE_BODY), Duration::ZERO);
    let cancel = CancelToken::new();
    cancel.cancel();

    let outcome = orchestrator.run(&files(&["a.wav", "b.wav"]), &cancel, |_| {}).await;

    assert!(outcome.done);
    assert!(outcome.cancelled);
    assert_eq!(outcome.attempted, 0);
    assert!(outcome.results.is_empty());
}

#[tokio::test]
async fn cancel_mid_run_keeps_partial_results() {
    let orchestrator =
        BatchOrchestrator::new(transcriber(), FakeScorer::new(HIGH_SCORE_BODY), Duration::ZERO);
    let cancel = CancelToken::new();
    let trigger = cancel.clone();

    let outcome = orchestrator
        .run(&files(&["a.wav", "b.wav", "c.wav", "d.wav"]), &cancel, |p| {
            if p.index == 1 {
                trigger.cancel();
            }
        })
        .await;

    assert!(outcome.done);
    assert!(outcome.cancelled);
    assert_eq!(outcome.attempted, 2);
    assert_eq!(outcome.results.len(), 2);
}

// ── Scoring contract ────────────────────────────────────────────────────────

#[test]
fn missing_fields_take_documented_defaults() {
    let r = CallAnalysis::default().to_batch_result("blank.wav");
    assert_eq!(r.score, 50);
    assert_eq!(r.tier, AutomationTier::Hybrid);
    assert_eq!(r.call_type, "Unknown");
    assert_eq!(r.intent, "");
    assert_eq!(r.cost_reduction_pct, 50.0);
}

#[test]
fn unknown_tier_label_is_classified_from_score() {
    let analysis = parse_analysis_body(
        r#"{"automation_feasibility_score": 35, "scoring_breakdown": {"automation_tier": "Mostly Robots"}}"#,
    );
    let r = analysis.to_batch_result("odd.wav");
    assert_eq!(r.score, 35);
    assert_eq!(r.tier, AutomationTier::HumanRequired);
}

#[test]
fn category_sum_overrides_headline_score() {
    let analysis = parse_analysis_body(
        r#"{"analysis": {
            "automation_feasibility_score": 10,
            "scoring_breakdown": {
                "intent_clarity": {"score": 18},
                "data_availability": {"score": 17},
                "workflow_complexity": {"score": 16},
                "compliance_risk": {"score": 15},
                "sentiment_sensitivity": {"score": 14}
            }
        }}"#,
    );
    assert_eq!(analysis.automation_feasibility_score, Some(80.0));
}

#[test]
fn garbage_body_falls_back_to_default_record() {
    for body in ["not json at all", "[1, 2, 3]", r#"{"call_type": 42}"#] {
        let r = parse_analysis_body(body).to_batch_result("x.wav");
        assert_eq!(r.score, 72, "body {body}");
        assert_eq!(r.tier, AutomationTier::Hybrid);
        assert_eq!(r.call_type, "General Inquiry");
        assert_eq!(r.cost_reduction_pct, 60.0);
    }
}

// ── Aggregate statistics ────────────────────────────────────────────────────

#[test]
fn fully_automatable_savings_ignore_own_estimate() {
    let low = compute_stats(&[result("a", 90, AutomationTier::FullyAutomatable, 5.0)], 5_000.0, 4.5);
    let high = compute_stats(&[result("a", 90, AutomationTier::FullyAutomatable, 95.0)], 5_000.0, 4.5);

    let expected = 0.856 * 4.5 * 5_000.0 * 12.0;
    assert!((low.annual_savings - expected).abs() < 1e-6);
    assert_eq!(low.annual_savings, high.annual_savings);
}

#[test]
fn tier_savings_weights() {
    let results = [
        result("hybrid", 70, AutomationTier::Hybrid, 40.0),
        result("prep", 50, AutomationTier::AiPrepHuman, 99.0),
        result("human", 20, AutomationTier::HumanRequired, 99.0),
        result("full", 85, AutomationTier::FullyAutomatable, 0.0),
    ];
    let stats = compute_stats(&results, 4_000.0, 10.0);

    // 1,000 calls per result per month
    let per_result = 10.0 * 1_000.0 * 12.0;
    let expected = per_result * (0.40 + 0.30 + 0.0 + 0.856);
    assert!((stats.annual_savings - expected).abs() < 1e-6, "{}", stats.annual_savings);

    assert_eq!(stats.fully_automatable, 1);
    assert_eq!(stats.hybrid, 1);
    assert_eq!(stats.ai_prep_human, 1);
    assert_eq!(stats.human_required, 1);
    assert_eq!(stats.tier_share(AutomationTier::Hybrid), 25.0);
    assert!((stats.avg_score - 56.25).abs() < 1e-12);
    assert_eq!(stats.fte_equivalent, (expected / (23.0 * 8.0 * 260.0)).round());
}

#[test]
fn top_candidates_are_ten_highest_in_stable_order() {
    let results: Vec<_> = (0..14)
        .map(|i| result(&format!("f{i:02}"), if i % 2 == 0 { 80 } else { 60 }, AutomationTier::Hybrid, 50.0))
        .collect();
    let stats = compute_stats(&results, 5_000.0, 4.5);

    assert_eq!(stats.top_candidates.len(), 10);
    let names: Vec<_> = stats.top_candidates.iter().map(|r| r.file_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["f00", "f02", "f04", "f06", "f08", "f10", "f12", "f01", "f03", "f05"]
    );
}

#[test]
fn empty_batch_is_all_zeros() {
    let stats = compute_stats(&[], 5_000.0, 4.5);
    assert_eq!(stats.avg_score, 0.0);
    assert_eq!(stats.annual_savings, 0.0);
    assert_eq!(stats.fte_equivalent, 0.0);
    assert_eq!(stats.total(), 0);
    assert!(stats.top_candidates.is_empty());
    assert_eq!(stats.tier_share(AutomationTier::FullyAutomatable), 0.0);
}

// ── Queue ───────────────────────────────────────────────────────────────────

#[test]
fn queue_accepts_audio_once() {
    let mut queue = BatchQueue::new();
    let accepted = queue.add_files(vec![
        AudioFile::new("call-1.WAV", vec![1]),
        AudioFile::new("notes.txt", vec![2]),
        AudioFile::new("call-2.m4a", vec![3]),
        AudioFile::new("call-1.WAV", vec![4]),
        AudioFile::new("no_extension", vec![5]),
    ]);

    assert_eq!(accepted, 2);
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.files()[0].bytes, vec![1]);
    assert_eq!(queue.files()[1].stem(), "call-2");

    queue.clear();
    assert!(queue.is_empty());
}

#[test]
fn duration_estimate_rounds_bytes_over_sixteen_thousand() {
    assert_eq!(AudioFile::new("a.wav", vec![0; 16_000]).estimated_duration_secs(), 1);
    assert_eq!(AudioFile::new("a.wav", vec![0; 23_999]).estimated_duration_secs(), 1);
    assert_eq!(AudioFile::new("a.wav", vec![0; 24_000]).estimated_duration_secs(), 2);
    assert_eq!(AudioFile::new("a.wav", Vec::new()).estimated_duration_secs(), 0);
}
