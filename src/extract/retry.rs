//! Bounded retry around the completion call.
//!
//! Truncated output is the single retryable condition; the loop takes
//! at most `max_attempts` total attempts with a fixed pause between
//! them, and the pause goes through an injectable trait so tests count
//! waits instead of spending wall-clock time.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::errors::{AppError, AppResult};
use crate::extract::{Extraction, Extractor};

/// Retry budget: total attempts (not additional retries) and the
/// fixed delay between them.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(5),
        }
    }
}

/// How one attempt resolved.
#[derive(Debug)]
pub enum Attempt {
    Success(Extraction),
    Retryable(AppError),
    Fatal(AppError),
}

pub fn classify(result: AppResult<Extraction>) -> Attempt {
    match result {
        Ok(extraction) => Attempt::Success(extraction),
        Err(err) if err.retryable() => Attempt::Retryable(err),
        Err(err) => Attempt::Fatal(err),
    }
}

/// Pause between attempts.
#[async_trait]
pub trait Backoff: Send + Sync {
    async fn wait(&self, delay: Duration);
}

/// Production pause: a real async sleep.
pub struct SleepBackoff;

#[async_trait]
impl Backoff for SleepBackoff {
    async fn wait(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Drive the extractor under the policy. Retryable failures consume
/// attempts with a pause in between; fatal failures surface at once.
/// An exhausted budget becomes `RetriesExhausted` naming the file.
pub async fn run_with_retry(
    extractor: &dyn Extractor,
    backoff: &dyn Backoff,
    policy: &RetryPolicy,
    instruction: &str,
    document_text: &str,
    file_name: &str,
) -> AppResult<Extraction> {
    let mut attempt = 1u32;
    loop {
        match classify(extractor.extract(instruction, document_text).await) {
            Attempt::Success(extraction) => return Ok(extraction),
            Attempt::Fatal(err) => return Err(err),
            Attempt::Retryable(err) => {
                tracing::warn!(
                    file = file_name,
                    attempt,
                    max_attempts = policy.max_attempts,
                    error = %err,
                    "extraction attempt failed"
                );
                if attempt >= policy.max_attempts {
                    return Err(AppError::RetriesExhausted(file_name.to_string()));
                }
                backoff.wait(policy.backoff).await;
                attempt += 1;
            }
        }
    }
}
