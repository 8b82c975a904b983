use serde::{Deserialize, Serialize};

/// Configuration for the transcription system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// ASR backend to use: "local_whisper", "remote_http".
    pub backend: String,
    /// Path to the Whisper model file (for local_whisper backend).
    pub whisper_model_path: Option<String>,
    /// Language hint for ASR (e.g. "en", "de"). None = auto-detect.
    pub language: Option<String>,
    /// Inference threads for local_whisper. None = whisper.cpp default.
    pub threads: Option<usize>,
    /// Transcription endpoint (for remote_http backend).
    pub remote_endpoint: Option<String>,
    /// Bearer token sent to the remote endpoint, if any.
    pub remote_api_key: Option<String>,
    /// Model name sent to the remote endpoint.
    pub remote_model: String,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            backend: "remote_http".to_string(),
            whisper_model_path: None,
            language: None,
            threads: None,
            remote_endpoint: None,
            remote_api_key: None,
            remote_model: "whisper-1".to_string(),
        }
    }
}
