//! The extraction stage: prompt, completion seam, bounded retry, and
//! the end-to-end document pipeline.

pub mod pipeline;
pub mod prompts;
pub mod retry;

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::core::types::TokenUsage;
use crate::schema::ResumeRecord;

/// One validated completion: the parsed record plus usage counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: ResumeRecord,
    pub usage: TokenUsage,
}

/// Seam over the completion endpoint. Production uses
/// [`crate::providers::openai::OpenAiClient`]; tests script their own
/// implementations.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, instruction: &str, document_text: &str) -> AppResult<Extraction>;
}
