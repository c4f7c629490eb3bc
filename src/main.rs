use anyhow::Context as _;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use turnscribe::config::Config;
use turnscribe::db;
use turnscribe::notify::LogNotifier;
use turnscribe::pipeline::Pipeline;
use turnscribe::sources::{
    DiarizationSource, JsonFileSource, RemoteDiarization, TranscriptionSource,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let mut args = std::env::args().skip(1);
    let audio = PathBuf::from(
        args.next()
            .context("Usage: turnscribe <audio-file> [file-id]")?,
    );
    let file_id = match args.next() {
        Some(id) => id,
        None => audio
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .context("Audio path has no file stem; pass an explicit file id")?,
    };

    let pool = db::init_db(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    info!("Database initialized at {}", config.database_url);

    let transcription = build_transcription_source(&config)?;
    let diarization = build_diarization_source(&config)?;

    let pipeline = Pipeline::new(
        transcription,
        diarization,
        pool,
        Arc::new(LogNotifier),
        config.tolerance,
    );

    let processed = pipeline
        .process_file(&file_id, &audio)
        .await
        .with_context(|| format!("Failed to process {}", audio.display()))?;

    info!(
        "Processed {}: {} turns",
        processed.file_id,
        processed.turns.len()
    );
    println!("{}", processed.transcript);

    Ok(())
}

fn build_transcription_source(config: &Config) -> anyhow::Result<Arc<dyn TranscriptionSource>> {
    if let Some(path) = &config.transcription_json {
        info!("Using precomputed transcription from {:?}", path);
        return Ok(Arc::new(JsonFileSource::new(path.clone())));
    }

    #[cfg(feature = "whisper")]
    if let Some(model) = &config.whisper_model {
        let source = turnscribe::sources::WhisperTranscription::load(
            model,
            config.whisper_language.clone(),
        )?;
        return Ok(Arc::new(source));
    }

    anyhow::bail!(
        "No transcription source configured: set TRANSCRIPTION_JSON, \
        or build with --features whisper and set WHISPER_MODEL"
    )
}

fn build_diarization_source(config: &Config) -> anyhow::Result<Arc<dyn DiarizationSource>> {
    if let Some(path) = &config.diarization_json {
        info!("Using precomputed diarization from {:?}", path);
        return Ok(Arc::new(JsonFileSource::new(path.clone())));
    }

    if let Some(endpoint) = &config.diarization_url {
        let mut source = RemoteDiarization::new(endpoint.clone());
        if let Some(token) = &config.diarization_token {
            source = source.with_token(token.clone());
        }
        if let Some(model) = &config.diarization_model {
            source = source.with_model(model.clone());
        }
        return Ok(Arc::new(source));
    }

    anyhow::bail!("No diarization source configured: set DIARIZATION_JSON or DIARIZATION_URL")
}
