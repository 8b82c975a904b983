use audioscribe_config::Settings;
use audioscribe_transcription::{EngineGate, TranscriptionService};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub gate: Arc<EngineGate>,
    pub transcription: TranscriptionService,
}

impl AppState {
    /// Builds state around an existing gate; the gate may still be loading.
    pub fn new(settings: Settings, gate: Arc<EngineGate>) -> Self {
        let upload_dir = settings.transcription.upload_dir.as_ref().map(PathBuf::from);
        let transcription = TranscriptionService::new(Arc::clone(&gate), upload_dir);

        Self {
            settings,
            gate,
            transcription,
        }
    }
}
