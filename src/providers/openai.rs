use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::core::errors::{AppError, AppResult};
use crate::extract::{Extraction, Extractor};
use crate::schema::{self, ResumeRecord};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-2024-08-06";
const TEMPERATURE: f64 = 0.65;

/// Chat-completions client constrained to the résumé schema. One call
/// per invocation; retry policy lives with the caller.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

#[derive(Debug, serde::Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<crate::core::types::TokenUsage>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|err| AppError::Network(err.to_string()))?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub async fn complete(&self, instruction: &str, document_text: &str) -> AppResult<Extraction> {
        let payload = serde_json::json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "system", "content": instruction },
                { "role": "user", "content": document_text }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "resume_record",
                    "schema": schema::response_schema()
                }
            }
        });

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    AppError::ProviderTimeout
                } else {
                    AppError::Network(err.to_string())
                }
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(AppError::ProviderAuth),
            StatusCode::TOO_MANY_REQUESTS => return Err(AppError::ProviderRateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(AppError::ProviderInvalidResponse(format!(
                    "status {status} body {body}"
                )));
            }
            _ => {}
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| AppError::ProviderInvalidResponse(err.to_string()))?;

        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ProviderInvalidResponse("no completion choice".to_string()))?;

        // Truncation is checked first: a cut-off body is retried, not
        // surfaced as a schema failure.
        if choice.finish_reason.as_deref() == Some("length") {
            return Err(AppError::OutputTruncated);
        }
        if let Some(refusal) = choice.message.refusal.filter(|r| !r.trim().is_empty()) {
            return Err(AppError::ModelRefusal(refusal));
        }
        let content = choice
            .message
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                AppError::ProviderInvalidResponse("completion has no content".to_string())
            })?;

        let record: ResumeRecord =
            serde_json::from_str(&content).map_err(|err| AppError::SchemaInvalid {
                reason: err.to_string(),
                raw: content.clone(),
            })?;

        let usage = body.usage.unwrap_or_default();
        tracing::info!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "completion finished"
        );

        Ok(Extraction { record, usage })
    }
}

#[async_trait]
impl Extractor for OpenAiClient {
    async fn extract(&self, instruction: &str, document_text: &str) -> AppResult<Extraction> {
        self.complete(instruction, document_text).await
    }
}
