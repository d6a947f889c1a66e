//! Environment-sourced configuration.

use std::path::PathBuf;

use crate::{
    core::errors::{AppError, AppResult},
    db,
    providers::openai::DEFAULT_MODEL,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub model: String,
    /// Holds the SQLite file and the doc-conversion cache.
    pub data_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first
    /// when present.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let data_dir = match std::env::var("KEIREKI_DATA_DIR") {
            Ok(value) => PathBuf::from(value),
            Err(_) => db::default_data_dir(None)?,
        };

        Ok(Self {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            model: std::env::var("KEIREKI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            data_dir,
        })
    }

    /// Where `.doc` inputs converted to PDF are cached between runs.
    pub fn doc_cache_dir(&self) -> PathBuf {
        self.data_dir.join("output_pdfs")
    }
}

fn require_env(key: &str) -> AppResult<String> {
    std::env::var(key)
        .map_err(|_| AppError::Config(format!("environment variable {key} is not set")))
}
