use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schema::ResumeRecord;

/// Wall-clock timings for one document, in seconds. The key names are
/// part of the stored-record contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStats {
    pub pdf_parse_time: f64,
    pub total_inference_time: f64,
    pub total_time: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// One persisted extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    pub unique_id: String,
    pub file_name: String,
    pub llm_output: ResumeRecord,
    pub time_stats: TimeStats,
    pub created_at: DateTime<Utc>,
}

/// What `process` hands back for a successfully handled document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub record_id: String,
    pub unique_id: String,
    pub file_name: String,
    pub record: ResumeRecord,
    pub usage: TokenUsage,
    pub time_stats: TimeStats,
}
