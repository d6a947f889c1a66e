//! One document, start to finish: normalize the file, run the
//! schema-constrained extraction under the retry policy, persist the
//! result with its timing breakdown.

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::{
    core::{
        errors::AppResult,
        types::{ProcessOutcome, TimeStats},
    },
    db::{repositories::records, Database},
    extract::{
        prompts::RESUME_EXTRACTION_PROMPT,
        retry::{run_with_retry, Backoff, RetryPolicy},
        Extractor,
    },
    normalize,
};

/// Human-facing record handle: file stem with spaces replaced by
/// underscores, suffixed with the unix epoch seconds at processing time.
/// Collisions are tolerated; the store's UUID is the real key.
pub fn unique_record_id(file_name: &str, at: DateTime<Utc>) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    format!("{}_{}", stem.replace(' ', "_"), at.timestamp())
}

#[allow(clippy::too_many_arguments)]
pub async fn process_document(
    db: &Database,
    extractor: &dyn Extractor,
    backoff: &dyn Backoff,
    policy: &RetryPolicy,
    doc_cache_dir: &Path,
    path: &Path,
    file_name: &str,
) -> AppResult<ProcessOutcome> {
    let total_started = Instant::now();

    let parse_started = Instant::now();
    let document_text = normalize::normalize(path, doc_cache_dir)?;
    let pdf_parse_time = parse_started.elapsed().as_secs_f64();
    tracing::debug!(
        file = file_name,
        chars = document_text.chars().count(),
        "document normalized"
    );

    let inference_started = Instant::now();
    let extraction = run_with_retry(
        extractor,
        backoff,
        policy,
        RESUME_EXTRACTION_PROMPT,
        &document_text,
        file_name,
    )
    .await?;
    let total_inference_time = inference_started.elapsed().as_secs_f64();

    let created_at = Utc::now();
    let unique_id = unique_record_id(file_name, created_at);
    let time_stats = TimeStats {
        pdf_parse_time,
        total_inference_time,
        total_time: total_started.elapsed().as_secs_f64(),
    };

    let record_id = records::insert_record(
        db.pool(),
        records::NewRecord {
            unique_id: &unique_id,
            file_name,
            record: &extraction.record,
            time_stats: &time_stats,
            created_at,
        },
    )
    .await?;

    tracing::info!(
        file = file_name,
        record_id = %record_id,
        parse_secs = time_stats.pdf_parse_time,
        inference_secs = time_stats.total_inference_time,
        total_secs = time_stats.total_time,
        "document processed"
    );

    Ok(ProcessOutcome {
        record_id,
        unique_id,
        file_name: file_name.to_string(),
        record: extraction.record,
        usage: extraction.usage,
        time_stats,
    })
}
