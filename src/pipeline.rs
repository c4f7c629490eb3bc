//! Per-file orchestration: sources → align → merge → format → store → notify.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::db::{self, DbPool};
use crate::notify::Notifier;
use crate::sources::{DiarizationSource, SourceError, TranscriptionSource};
use crate::transcript::{align, format_transcript, merge_turns, AlignError, Turn};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("transcription source failed: {0}")]
    Transcription(#[source] SourceError),
    #[error("diarization source failed: {0}")]
    Diarization(#[source] SourceError),
    #[error(transparent)]
    Align(#[from] AlignError),
    #[error("failed to store transcript: {0}")]
    Store(#[from] sqlx::Error),
}

/// Result of processing one file.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub file_id: String,
    pub turns: Vec<Turn>,
    pub transcript: String,
}

/// Processes audio files into stored, speaker-attributed transcripts.
///
/// Holds no shared mutable state; concurrent `process_file` calls need no
/// coordination. Callers wanting timeouts or cancellation apply them around
/// a whole call.
pub struct Pipeline {
    transcription: Arc<dyn TranscriptionSource>,
    diarization: Arc<dyn DiarizationSource>,
    db: DbPool,
    notifier: Arc<dyn Notifier>,
    tolerance: f64,
}

impl Pipeline {
    pub fn new(
        transcription: Arc<dyn TranscriptionSource>,
        diarization: Arc<dyn DiarizationSource>,
        db: DbPool,
        notifier: Arc<dyn Notifier>,
        tolerance: f64,
    ) -> Self {
        Self {
            transcription,
            diarization,
            db,
            notifier,
            tolerance,
        }
    }

    /// Run the full pipeline for one audio file and persist the result
    /// under `file_id`.
    pub async fn process_file(
        &self,
        file_id: &str,
        audio: &Path,
    ) -> Result<ProcessedFile, PipelineError> {
        info!("Processing {} from {:?}", file_id, audio);

        let (transcription, diarization) = tokio::join!(
            self.transcription.transcribe(audio),
            self.diarization.diarize(audio),
        );
        let transcription = transcription.map_err(PipelineError::Transcription)?;
        let diarization = diarization.map_err(PipelineError::Diarization)?;

        info!(
            "Aligning {} transcription segments against {} diarization segments (tolerance {:.2}s)",
            transcription.len(),
            diarization.len(),
            self.tolerance
        );

        let attributed = align(&transcription, &diarization, self.tolerance)?;
        let turns = merge_turns(&attributed);
        let transcript = format_transcript(&turns);

        let filename = audio
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| audio.display().to_string());

        db::store_transcript(&self.db, file_id, &filename, &transcript, &turns).await?;
        info!("Stored {} turns for {}", turns.len(), file_id);

        // Notification failures don't fail the file; the transcript is
        // already stored.
        if let Err(e) = self.notifier.notify(file_id, &transcript).await {
            warn!("Failed to notify for {}: {}", file_id, e);
        }

        Ok(ProcessedFile {
            file_id: file_id.to_string(),
            turns,
            transcript,
        })
    }
}
