use std::sync::Arc;

use audioscribe_config::TranscriptionSettings;
use audioscribe_transcription::{EngineGate, TranscriptionConfig, asr};
use tracing::{error, info};

pub fn transcription_config(settings: &TranscriptionSettings) -> TranscriptionConfig {
    TranscriptionConfig {
        backend: settings.backend.clone(),
        whisper_model_path: settings.whisper_model_path.clone(),
        language: settings.language.clone(),
        threads: settings.threads,
        remote_endpoint: settings.remote_endpoint.clone(),
        remote_api_key: settings.remote_api_key.clone(),
        remote_model: settings.remote_model.clone(),
    }
}

/// Loads the configured backend and drives the gate to `Ready`.
///
/// On failure the gate falls back to `Unloaded` and requests keep getting 503.
pub async fn load(gate: Arc<EngineGate>, config: TranscriptionConfig) {
    if !gate.begin_loading() {
        return;
    }

    info!(backend = %config.backend, "Loading ASR backend");
    let built = tokio::task::spawn_blocking(move || asr::build_backend(&config)).await;

    match built {
        Ok(Ok(backend)) => {
            gate.mark_ready(backend);
        }
        Ok(Err(e)) => {
            error!("Failed to load ASR backend: {:#}", e);
            gate.mark_failed();
        }
        Err(e) => {
            error!("ASR backend loader panicked: {}", e);
            gate.mark_failed();
        }
    }
}
