//! Environment-driven configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Soft-match tolerance applied when none is configured, in seconds.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("TURNSCRIBE_TOLERANCE must be a non-negative number of seconds, got {0:?}")]
    InvalidTolerance(String),
}

/// Runtime configuration, read from the environment (a `.env` file is
/// honored via dotenvy before this runs).
#[derive(Debug, Clone)]
pub struct Config {
    /// Soft-match tolerance in seconds (`TURNSCRIBE_TOLERANCE`)
    pub tolerance: f64,
    /// SQLite database URL (`DATABASE_URL`)
    pub database_url: String,
    /// Endpoint of the remote diarization service (`DIARIZATION_URL`)
    pub diarization_url: Option<String>,
    /// Bearer token for the diarization service (`DIARIZATION_TOKEN`)
    pub diarization_token: Option<String>,
    /// Model name forwarded to the diarization service (`DIARIZATION_MODEL`)
    pub diarization_model: Option<String>,
    /// Precomputed transcription sidecar (`TRANSCRIPTION_JSON`)
    pub transcription_json: Option<PathBuf>,
    /// Precomputed diarization sidecar (`DIARIZATION_JSON`)
    pub diarization_json: Option<PathBuf>,
    /// Path to a local whisper.cpp ggml model (`WHISPER_MODEL`)
    pub whisper_model: Option<PathBuf>,
    /// Language hint for local transcription (`WHISPER_LANGUAGE`)
    pub whisper_language: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let tolerance = match std::env::var("TURNSCRIBE_TOLERANCE") {
            Ok(raw) => {
                let parsed: f64 = raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidTolerance(raw.clone()))?;
                if !parsed.is_finite() || parsed < 0.0 {
                    return Err(ConfigError::InvalidTolerance(raw));
                }
                parsed
            }
            Err(_) => DEFAULT_TOLERANCE,
        };

        Ok(Self {
            tolerance,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:turnscribe.db".to_string()),
            diarization_url: std::env::var("DIARIZATION_URL").ok(),
            diarization_token: std::env::var("DIARIZATION_TOKEN").ok(),
            diarization_model: std::env::var("DIARIZATION_MODEL").ok(),
            transcription_json: std::env::var("TRANSCRIPTION_JSON").ok().map(PathBuf::from),
            diarization_json: std::env::var("DIARIZATION_JSON").ok().map(PathBuf::from),
            whisper_model: std::env::var("WHISPER_MODEL").ok().map(PathBuf::from),
            whisper_language: std::env::var("WHISPER_LANGUAGE").ok(),
        })
    }
}
