use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("required converter missing: {0}")]
    DependencyMissing(String),
    #[error("document conversion failed: {0}")]
    ConversionFailed(String),
    #[error("database error: {0}")]
    Database(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("provider auth failed")]
    ProviderAuth,
    #[error("provider rate limited")]
    ProviderRateLimited,
    #[error("provider timeout")]
    ProviderTimeout,
    #[error("provider invalid response: {0}")]
    ProviderInvalidResponse(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("model output truncated before the schema closed")]
    OutputTruncated,
    #[error("model refused the request: {0}")]
    ModelRefusal(String),
    #[error("model output failed schema validation: {reason}")]
    SchemaInvalid { reason: String, raw: String },
    #[error("failed to process {0} after exhausting retries")]
    RetriesExhausted(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::DependencyMissing(_) => "DEPENDENCY_MISSING",
            Self::ConversionFailed(_) => "CONVERSION_FAILED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::ProviderAuth => "PROVIDER_AUTH",
            Self::ProviderRateLimited => "PROVIDER_RATE_LIMITED",
            Self::ProviderTimeout => "PROVIDER_TIMEOUT",
            Self::ProviderInvalidResponse(_) => "PROVIDER_INVALID_RESPONSE",
            Self::Network(_) => "NETWORK_ERROR",
            Self::OutputTruncated => "OUTPUT_TRUNCATED",
            Self::ModelRefusal(_) => "MODEL_REFUSAL",
            Self::SchemaInvalid { .. } => "SCHEMA_INVALID",
            Self::RetriesExhausted(_) => "RETRIES_EXHAUSTED",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Truncated output is the only condition worth another attempt;
    /// auth, rate-limit, schema and transport failures are terminal
    /// for the document.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::OutputTruncated)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(value: sqlx::Error) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        Self::Database(value.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Internal(value.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        Self::Io(value.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
