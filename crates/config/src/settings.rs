use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub transcription: TranscriptionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Upper bound for a multipart upload body, in bytes.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranscriptionSettings {
    /// Engine backend: "local_whisper" or "remote_http".
    pub backend: String,
    pub whisper_model_path: Option<String>,
    /// Language hint (ISO 639-1). None = auto-detect.
    pub language: Option<String>,
    pub threads: Option<usize>,
    /// Directory for request-scoped upload files. None = OS temp dir.
    pub upload_dir: Option<String>,
    pub remote_endpoint: Option<String>,
    pub remote_api_key: Option<String>,
    pub remote_model: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("AUDIOSCRIBE"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 8000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("app.max_upload_bytes", 100 * 1024 * 1024)?
            .set_default("transcription.backend", "remote_http")?
            .set_default("transcription.whisper_model_path", "models/ggml-base.bin")?
            .set_default("transcription.language", None::<String>)?
            .set_default("transcription.threads", None::<i64>)?
            .set_default("transcription.upload_dir", None::<String>)?
            .set_default(
                "transcription.remote_endpoint",
                "http://localhost:9000/v1/audio/transcriptions",
            )?
            .set_default("transcription.remote_api_key", None::<String>)?
            .set_default("transcription.remote_model", "whisper-1")?
            .build()?;

        config.try_deserialize()
    }
}
