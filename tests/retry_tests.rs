use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use keireki::core::errors::{AppError, AppResult};
use keireki::core::types::TokenUsage;
use keireki::extract::retry::{run_with_retry, Backoff, RetryPolicy};
use keireki::extract::{Extraction, Extractor};
use keireki::schema::ResumeRecord;

struct ScriptedExtractor {
    responses: Mutex<VecDeque<AppResult<Extraction>>>,
    calls: AtomicU32,
}

impl ScriptedExtractor {
    fn new(responses: Vec<AppResult<Extraction>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Extractor for ScriptedExtractor {
    async fn extract(&self, _instruction: &str, _document_text: &str) -> AppResult<Extraction> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("extractor called more often than scripted")
    }
}

struct RecordingBackoff {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingBackoff {
    fn new() -> Self {
        Self {
            waits: Mutex::new(Vec::new()),
        }
    }

    fn waits(&self) -> Vec<Duration> {
        self.waits.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backoff for RecordingBackoff {
    async fn wait(&self, delay: Duration) {
        self.waits.lock().unwrap().push(delay);
    }
}

fn success() -> AppResult<Extraction> {
    Ok(Extraction {
        record: ResumeRecord::default(),
        usage: TokenUsage::default(),
    })
}

#[tokio::test]
async fn first_attempt_success_never_waits() {
    let extractor = ScriptedExtractor::new(vec![success()]);
    let backoff = RecordingBackoff::new();
    let policy = RetryPolicy::default();

    let extraction = run_with_retry(&extractor, &backoff, &policy, "p", "doc", "a.pdf")
        .await
        .expect("should succeed");

    assert_eq!(extraction.record, ResumeRecord::default());
    assert_eq!(extractor.calls(), 1);
    assert!(backoff.waits().is_empty());
}

#[tokio::test]
async fn truncation_waits_once_then_retries() {
    let extractor = ScriptedExtractor::new(vec![Err(AppError::OutputTruncated), success()]);
    let backoff = RecordingBackoff::new();
    let policy = RetryPolicy {
        max_attempts: 2,
        backoff: Duration::from_secs(5),
    };

    run_with_retry(&extractor, &backoff, &policy, "p", "doc", "a.pdf")
        .await
        .expect("second attempt should succeed");

    assert_eq!(extractor.calls(), 2);
    assert_eq!(backoff.waits(), vec![Duration::from_secs(5)]);
}

#[tokio::test]
async fn each_truncation_before_success_waits_once() {
    let extractor = ScriptedExtractor::new(vec![
        Err(AppError::OutputTruncated),
        Err(AppError::OutputTruncated),
        success(),
    ]);
    let backoff = RecordingBackoff::new();
    let policy = RetryPolicy {
        max_attempts: 3,
        backoff: Duration::from_millis(250),
    };

    run_with_retry(&extractor, &backoff, &policy, "p", "doc", "a.pdf")
        .await
        .expect("third attempt should succeed");

    assert_eq!(extractor.calls(), 3);
    assert_eq!(
        backoff.waits(),
        vec![Duration::from_millis(250), Duration::from_millis(250)]
    );
}

#[tokio::test]
async fn exhausted_budget_names_the_file() {
    let extractor = ScriptedExtractor::new(vec![
        Err(AppError::OutputTruncated),
        Err(AppError::OutputTruncated),
    ]);
    let backoff = RecordingBackoff::new();
    let policy = RetryPolicy::default();

    let err = run_with_retry(&extractor, &backoff, &policy, "p", "doc", "resume.pdf")
        .await
        .expect_err("both attempts truncate");

    match err {
        AppError::RetriesExhausted(file) => assert_eq!(file, "resume.pdf"),
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    // Attempts stop at the budget, with one pause between the two.
    assert_eq!(extractor.calls(), 2);
    assert_eq!(backoff.waits().len(), 1);
}

#[tokio::test]
async fn fatal_errors_surface_without_retry() {
    let extractor = ScriptedExtractor::new(vec![Err(AppError::SchemaInvalid {
        reason: "missing field".to_string(),
        raw: "{}".to_string(),
    })]);
    let backoff = RecordingBackoff::new();
    let policy = RetryPolicy::default();

    let err = run_with_retry(&extractor, &backoff, &policy, "p", "doc", "a.pdf")
        .await
        .expect_err("fatal error should surface");

    assert!(matches!(err, AppError::SchemaInvalid { .. }));
    assert_eq!(extractor.calls(), 1);
    assert!(backoff.waits().is_empty());
}

#[tokio::test]
async fn refusal_and_auth_failures_are_fatal() {
    for err in [AppError::ModelRefusal("cannot".to_string()), AppError::ProviderAuth] {
        let extractor = ScriptedExtractor::new(vec![Err(err)]);
        let backoff = RecordingBackoff::new();
        let policy = RetryPolicy::default();

        run_with_retry(&extractor, &backoff, &policy, "p", "doc", "a.pdf")
            .await
            .expect_err("should be fatal");
        assert_eq!(extractor.calls(), 1);
        assert!(backoff.waits().is_empty());
    }
}
