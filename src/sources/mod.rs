//! Collaborator seams producing the two input sequences.
//!
//! Transcription and diarization are injected capabilities, never hidden
//! globals, so the pipeline can run against deterministic fakes in tests.

pub mod json;
pub mod remote;
#[cfg(feature = "whisper")]
pub mod whisper;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::transcript::{DiarizationSegment, TranscriptionSegment};

pub use json::JsonFileSource;
pub use remote::RemoteDiarization;
#[cfg(feature = "whisper")]
pub use whisper::WhisperTranscription;

/// Errors surfaced by transcription and diarization sources.
///
/// Source failures are never absorbed into an empty segment list; callers
/// decide what a failed file means.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode segments: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("diarization request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("diarization service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("model not found: {0}")]
    ModelNotFound(PathBuf),
    #[error("invalid audio: {0}")]
    InvalidAudio(String),
    #[error("transcription failed: {0}")]
    Transcription(String),
}

/// Produces an ordered sequence of transcription segments for a recording.
#[async_trait]
pub trait TranscriptionSource: Send + Sync {
    async fn transcribe(&self, audio: &Path) -> Result<Vec<TranscriptionSegment>, SourceError>;
}

/// Produces an ordered sequence of diarization segments for a recording.
///
/// Segments are consumed exactly as supplied; the pipeline enforces no
/// ordering on them.
#[async_trait]
pub trait DiarizationSource: Send + Sync {
    async fn diarize(&self, audio: &Path) -> Result<Vec<DiarizationSegment>, SourceError>;
}
