//! Precomputed segment sequences from JSON sidecar files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::info;

use super::{DiarizationSource, SourceError, TranscriptionSource};
use crate::transcript::{DiarizationSegment, TranscriptionSegment};

/// Reads an already-produced segment sequence from a JSON file.
///
/// The file holds a JSON array of segment records (`start`/`end` plus
/// `text` or `speaker`). The audio path handed to the source is ignored;
/// whoever produced the sidecar already consumed the audio. Useful for
/// offline runs and as the deterministic source in tests.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>, SourceError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let segments: Vec<T> = serde_json::from_slice(&bytes)?;
        info!("Loaded {} segments from {:?}", segments.len(), self.path);
        Ok(segments)
    }
}

#[async_trait]
impl TranscriptionSource for JsonFileSource {
    async fn transcribe(&self, _audio: &Path) -> Result<Vec<TranscriptionSegment>, SourceError> {
        self.load().await
    }
}

#[async_trait]
impl DiarizationSource for JsonFileSource {
    async fn diarize(&self, _audio: &Path) -> Result<Vec<DiarizationSegment>, SourceError> {
        self.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_transcription_segments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcription.json");
        std::fs::write(
            &path,
            r#"[{"start": 0.0, "end": 1.5, "text": "hello"},
               {"start": 1.5, "end": 3.0, "text": "world"}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(&path);
        let segments = source.transcribe(Path::new("unused.wav")).await.unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "hello");
        assert_eq!(segments[1].span.end, 3.0);
    }

    #[tokio::test]
    async fn test_reads_diarization_segments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diarization.json");
        std::fs::write(
            &path,
            r#"[{"start": 0.0, "end": 2.0, "speaker": "SPEAKER_00"}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(&path);
        let segments = source.diarize(Path::new("unused.wav")).await.unwrap();
        assert_eq!(segments, vec![DiarizationSegment::new(0.0, 2.0, "SPEAKER_00")]);
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let source = JsonFileSource::new("does/not/exist.json");
        let err = source.diarize(Path::new("unused.wav")).await.unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let source = JsonFileSource::new(&path);
        let err = source.transcribe(Path::new("unused.wav")).await.unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
