use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Deserialize;
use tracing::{debug, info};

use super::{AsrBackend, EngineError, RawRecognitionResult, RawSegment, load_audio};
use crate::config::TranscriptionConfig;
use crate::source::AudioSource;

/// Remote ASR backend speaking the OpenAI-compatible transcription API.
///
/// Works against any server exposing `/v1/audio/transcriptions` with
/// `response_format=verbose_json` (faster-whisper-server, whisper.cpp server,
/// OpenAI itself). Remote references are downloaded here and re-uploaded.
pub struct RemoteHttpBackend {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    avg_logprob: Option<f64>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
    #[serde(default)]
    avg_logprob: Option<f64>,
}

impl From<VerboseTranscription> for RawRecognitionResult {
    fn from(v: VerboseTranscription) -> Self {
        Self {
            text: v.text,
            language: v.language.unwrap_or_default(),
            avg_logprob: v.avg_logprob,
            segments: v
                .segments
                .into_iter()
                .map(|s| RawSegment::new(s.start, s.end, s.text, s.avg_logprob))
                .collect(),
        }
    }
}

impl RemoteHttpBackend {
    pub fn new(config: &TranscriptionConfig) -> anyhow::Result<Self> {
        let endpoint = config
            .remote_endpoint
            .clone()
            .ok_or_else(|| anyhow::anyhow!("remote_http backend requires transcription.remote_endpoint"))?;
        info!(%endpoint, model = %config.remote_model, "Using remote transcription endpoint");
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_key: config.remote_api_key.clone(),
            model: config.remote_model.clone(),
            language: config.language.clone(),
        })
    }
}

#[async_trait]
impl AsrBackend for RemoteHttpBackend {
    async fn transcribe(&self, source: &AudioSource) -> Result<RawRecognitionResult, EngineError> {
        let audio = load_audio(&self.client, source).await?;
        let size = audio.bytes.len();

        let part = multipart::Part::bytes(audio.bytes)
            .file_name(audio.filename)
            .mime_str(&audio.content_type)
            .map_err(|e| EngineError::Unsupported(format!("content type: {}", e)))?;

        let mut form = multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("response_format", "verbose_json");
        if let Some(ref lang) = self.language {
            form = form.text("language", lang.clone());
        }

        let mut req = self.client.post(&self.endpoint).multipart(form);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }

        debug!(endpoint = %self.endpoint, bytes = size, "Sending audio to remote engine");
        let resp = req
            .send()
            .await
            .map_err(|e| EngineError::Inference(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EngineError::Inference(format!(
                "engine returned {}: {}",
                status, body
            )));
        }

        let verbose: VerboseTranscription = resp
            .json()
            .await
            .map_err(|e| EngineError::Inference(format!("invalid engine response: {}", e)))?;

        Ok(verbose.into())
    }

    fn name(&self) -> &str {
        "remote_http"
    }
}
