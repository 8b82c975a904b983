#[cfg(feature = "local-whisper")]
pub mod local_whisper;

#[cfg(feature = "remote-http")]
pub mod remote_http;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::TranscriptionConfig;
use crate::source::AudioSource;

/// Raw output of an ASR backend, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecognitionResult {
    pub text: String,
    pub language: String,
    /// Overall average log-probability, when the backend reports one.
    pub avg_logprob: Option<f64>,
    pub segments: Vec<RawSegment>,
}

/// A segment exactly as the backend produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    /// Seconds.
    pub start: f64,
    /// Seconds.
    pub end: f64,
    pub text: String,
    pub avg_logprob: Option<f64>,
}

impl RawSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>, avg_logprob: Option<f64>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            avg_logprob,
        }
    }
}

/// Failure raised by an ASR backend.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to fetch audio: {0}")]
    Fetch(String),
    #[error("failed to decode audio: {0}")]
    Decode(String),
    #[error("unsupported audio: {0}")]
    Unsupported(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for pluggable ASR backends.
#[async_trait]
pub trait AsrBackend: Send + Sync + 'static {
    /// Transcribes a whole audio source. May block for the full inference time.
    async fn transcribe(&self, source: &AudioSource) -> Result<RawRecognitionResult, EngineError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

/// Audio bytes loaded from an [`AudioSource`], ready to hand to a decoder or upstream.
pub struct AudioPayload {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

/// Reads an upload from its scoped file, or downloads a remote reference.
pub async fn load_audio(
    client: &reqwest::Client,
    source: &AudioSource,
) -> Result<AudioPayload, EngineError> {
    match source {
        AudioSource::Upload(upload) => {
            let bytes = tokio::fs::read(upload.path()).await?;
            Ok(AudioPayload {
                bytes,
                filename: upload.filename().to_string(),
                content_type: upload.content_type().to_string(),
            })
        }
        AudioSource::Remote(url) => {
            debug!(%url, "Fetching remote audio");
            let resp = client
                .get(url)
                .send()
                .await
                .map_err(|e| EngineError::Fetch(e.to_string()))?
                .error_for_status()
                .map_err(|e| EngineError::Fetch(e.to_string()))?;

            let content_type = resp
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("application/octet-stream")
                .to_string();
            let filename = filename_from_url(url);
            let bytes = resp
                .bytes()
                .await
                .map_err(|e| EngineError::Fetch(e.to_string()))?;

            debug!(bytes = bytes.len(), %content_type, "Remote audio fetched");
            Ok(AudioPayload {
                bytes: bytes.to_vec(),
                filename,
                content_type,
            })
        }
    }
}

fn filename_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/')
        .next()
        .filter(|name| !name.is_empty() && !name.contains(':'))
        .unwrap_or("audio")
        .to_string()
}

/// Builds the backend named in `config.backend`.
///
/// Loading a local model is slow; call this off the async runtime.
pub fn build_backend(config: &TranscriptionConfig) -> anyhow::Result<Arc<dyn AsrBackend>> {
    match config.backend.as_str() {
        #[cfg(feature = "remote-http")]
        "remote_http" => Ok(Arc::new(remote_http::RemoteHttpBackend::new(config)?)),
        #[cfg(feature = "local-whisper")]
        "local_whisper" => Ok(Arc::new(local_whisper::LocalWhisperBackend::new(config)?)),
        other => Err(anyhow::anyhow!(
            "ASR backend '{}' is unknown or not compiled in",
            other
        )),
    }
}
