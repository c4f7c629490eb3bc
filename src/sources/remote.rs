//! HTTP client for a hosted diarization inference service.

use std::path::Path;

use async_trait::async_trait;
use tracing::info;

use super::{DiarizationSource, SourceError};
use crate::transcript::DiarizationSegment;

/// Posts the audio artifact to a diarization service and decodes the
/// returned `{start, end, speaker}` records.
///
/// Model selection and the access token are plain configuration here;
/// which pretrained pipeline runs behind the endpoint is the service's
/// business.
pub struct RemoteDiarization {
    client: reqwest::Client,
    endpoint: String,
    token: Option<String>,
    model: Option<String>,
}

impl RemoteDiarization {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: None,
            model: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[async_trait]
impl DiarizationSource for RemoteDiarization {
    async fn diarize(&self, audio: &Path) -> Result<Vec<DiarizationSegment>, SourceError> {
        info!("Requesting diarization for {:?} from {}", audio, self.endpoint);

        let bytes = tokio::fs::read(audio).await?;

        let mut request = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(model) = &self.model {
            request = request.query(&[("model", model.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let segments: Vec<DiarizationSegment> = response.json().await?;
        info!("Diarization returned {} segments", segments.len());
        Ok(segments)
    }
}
