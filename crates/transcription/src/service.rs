use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{TranscribeError, TranscribeResult};
use crate::normalize::normalize;
use crate::readiness::EngineGate;
use crate::source::{self, AudioInput};
use crate::{TranscriptionResponse, invoker};

/// Runs one request through gate, resolver, backend and normalizer.
///
/// Created once at startup and shared; holds no per-request state.
#[derive(Clone)]
pub struct TranscriptionService {
    gate: Arc<EngineGate>,
    upload_dir: Option<PathBuf>,
}

impl TranscriptionService {
    pub fn new(gate: Arc<EngineGate>, upload_dir: Option<PathBuf>) -> Self {
        Self { gate, upload_dir }
    }

    pub fn is_ready(&self) -> bool {
        self.gate.is_ready()
    }

    /// Transcribes `input`.
    ///
    /// Returns `ModelNotReady` before touching any resource when the gate is
    /// not ready. Any staged upload file is deleted before this returns.
    pub async fn transcribe(&self, input: AudioInput) -> TranscribeResult<TranscriptionResponse> {
        let backend = self.gate.backend().ok_or(TranscribeError::ModelNotReady)?;

        let source = source::resolve(input, self.upload_dir.as_deref()).await?;
        let label = source.describe().to_string();
        info!(source = %label, backend = %backend.name(), "Transcribing");

        let raw = invoker::invoke(backend.as_ref(), &source).await;
        drop(source);
        debug!(source = %label, "Audio source released");

        let response = normalize(raw?);
        info!(
            source = %label,
            language = %response.language,
            segments = response.segments.len(),
            speakers = response.speakers_detected,
            "Transcription completed successfully"
        );
        Ok(response)
    }
}
