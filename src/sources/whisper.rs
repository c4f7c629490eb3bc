//! Local speech-to-text via whisper.cpp.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::{SourceError, TranscriptionSource};
use crate::transcript::TranscriptionSegment;

/// Whisper's required sample rate
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Transcription source backed by a local whisper.cpp model.
///
/// Expects 16 kHz mono WAV input. Inference runs on the calling task;
/// bound concurrency at the file-processing level if that matters.
pub struct WhisperTranscription {
    ctx: WhisperContext,
    /// Language hint (None = auto-detect)
    language: Option<String>,
    n_threads: i32,
}

impl WhisperTranscription {
    /// Load a ggml model from disk.
    pub fn load(model_path: &Path, language: Option<String>) -> Result<Self, SourceError> {
        if !model_path.exists() {
            return Err(SourceError::ModelNotFound(model_path.to_path_buf()));
        }

        info!("Loading Whisper model from {:?}", model_path);

        let ctx = WhisperContext::new_with_params(
            &model_path.to_string_lossy(),
            WhisperContextParameters::default(),
        )
        .map_err(|e| SourceError::Transcription(format!("Failed to load model: {}", e)))?;

        // Use available CPU threads (leave 1 for system)
        let n_threads = std::thread::available_parallelism()
            .map(|p| (p.get() as i32 - 1).max(1))
            .unwrap_or(4);

        info!("Whisper model loaded (using {} threads)", n_threads);

        Ok(Self {
            ctx,
            language,
            n_threads,
        })
    }

    fn run_inference(&self, samples: &[f32]) -> Result<Vec<TranscriptionSegment>, SourceError> {
        // Greedy sampling for speed (beam search is 2-3x slower)
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(self.n_threads);
        params.set_token_timestamps(false);
        params.set_no_context(true);
        params.set_suppress_non_speech_tokens(true);

        match &self.language {
            Some(lang) => params.set_language(Some(lang)),
            None => params.set_language(Some("auto")),
        }

        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_print_special(false);

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| SourceError::Transcription(format!("Failed to create state: {}", e)))?;

        state
            .full(params, samples)
            .map_err(|e| SourceError::Transcription(format!("Inference failed: {}", e)))?;

        let num_segments = state
            .full_n_segments()
            .map_err(|e| SourceError::Transcription(format!("Failed to get segments: {}", e)))?;

        let mut segments = Vec::new();
        for i in 0..num_segments {
            let start_ts = state
                .full_get_segment_t0(i)
                .map_err(|e| SourceError::Transcription(format!("Failed to get start time: {}", e)))?;
            let end_ts = state
                .full_get_segment_t1(i)
                .map_err(|e| SourceError::Transcription(format!("Failed to get end time: {}", e)))?;
            let text = state
                .full_get_segment_text(i)
                .map_err(|e| SourceError::Transcription(format!("Failed to get text: {}", e)))?;

            let text = text.trim().to_string();
            if text.is_empty() {
                continue;
            }

            // Timestamps are in centiseconds (1/100 second)
            segments.push(TranscriptionSegment::new(
                start_ts as f64 / 100.0,
                end_ts as f64 / 100.0,
                text,
            ));
        }

        Ok(segments)
    }
}

/// Read a 16 kHz mono WAV file into normalized f32 samples.
fn read_wav_samples(path: &Path) -> Result<Vec<f32>, SourceError> {
    let mut reader =
        hound::WavReader::open(path).map_err(|e| SourceError::InvalidAudio(e.to_string()))?;
    let spec = reader.spec();

    if spec.channels != 1 || spec.sample_rate != WHISPER_SAMPLE_RATE {
        return Err(SourceError::InvalidAudio(format!(
            "expected {} Hz mono WAV, got {} Hz {} channel(s)",
            WHISPER_SAMPLE_RATE, spec.sample_rate, spec.channels
        )));
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::InvalidAudio(e.to_string()))?,
        hound::SampleFormat::Int => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / 32768.0))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SourceError::InvalidAudio(e.to_string()))?,
    };

    Ok(samples)
}

#[async_trait]
impl TranscriptionSource for WhisperTranscription {
    async fn transcribe(&self, audio: &Path) -> Result<Vec<TranscriptionSegment>, SourceError> {
        let samples = read_wav_samples(audio)?;

        info!(
            "Transcribing {:?} ({:.2}s of audio)",
            audio,
            samples.len() as f64 / WHISPER_SAMPLE_RATE as f64
        );

        let segments = self.run_inference(&samples)?;
        info!("Transcription produced {} segments", segments.len());
        Ok(segments)
    }
}
