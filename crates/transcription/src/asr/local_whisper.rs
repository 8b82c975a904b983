use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, info};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use super::{AsrBackend, EngineError, RawRecognitionResult, RawSegment, load_audio};
use crate::config::TranscriptionConfig;
use crate::pipeline::decode_to_mono_16k;
use crate::source::AudioSource;

/// Local Whisper ASR backend using whisper.cpp via whisper-rs.
///
/// One context is shared by all requests; inference runs one at a time on
/// the blocking thread pool.
pub struct LocalWhisperBackend {
    ctx: Arc<Mutex<WhisperContext>>,
    client: reqwest::Client,
    default_language: Option<String>,
    threads: Option<usize>,
}

impl LocalWhisperBackend {
    /// Creates a new Whisper backend, loading the model from disk.
    ///
    /// `whisper_model_path` should point to a GGML Whisper model file (e.g. ggml-base.bin).
    pub fn new(config: &TranscriptionConfig) -> anyhow::Result<Self> {
        let model_path = config
            .whisper_model_path
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("local_whisper backend requires transcription.whisper_model_path"))?;
        info!(model_path, "Loading Whisper model");
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .map_err(|e| anyhow::anyhow!("Failed to load Whisper model '{}': {}", model_path, e))?;
        info!("Whisper model loaded");
        Ok(Self {
            ctx: Arc::new(Mutex::new(ctx)),
            client: reqwest::Client::new(),
            default_language: config.language.clone(),
            threads: config.threads,
        })
    }
}

#[async_trait]
impl AsrBackend for LocalWhisperBackend {
    async fn transcribe(&self, source: &AudioSource) -> Result<RawRecognitionResult, EngineError> {
        let audio = load_audio(&self.client, source).await?;
        let ctx = Arc::clone(&self.ctx);
        let lang = self.default_language.clone();
        let threads = self.threads;

        // whisper-rs is CPU-bound; run on blocking thread pool
        tokio::task::spawn_blocking(move || -> Result<RawRecognitionResult, EngineError> {
            let samples = decode_to_mono_16k(audio.bytes, &audio.content_type)?;

            let ctx = ctx.lock();
            let mut state = ctx
                .create_state()
                .map_err(|e| EngineError::Inference(format!("Failed to create Whisper state: {}", e)))?;

            let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
            params.set_language(lang.as_deref());
            if let Some(threads) = threads {
                params.set_n_threads(threads as i32);
            }
            params.set_print_progress(false);
            params.set_print_special(false);
            params.set_print_realtime(false);
            params.set_print_timestamps(false);

            state
                .full(params, &samples)
                .map_err(|e| EngineError::Inference(format!("Whisper transcription failed: {}", e)))?;

            let language = whisper_rs::get_lang_str(state.full_lang_id_from_state())
                .unwrap_or("")
                .to_string();

            let mut text = String::new();
            let mut segments = Vec::new();
            let mut logprob_sum = 0.0;
            let mut token_count = 0usize;
            for segment in state.as_iter() {
                let seg_text = segment.to_string();
                text.push_str(&seg_text);

                let mut seg_sum = 0.0;
                let mut seg_tokens = 0usize;
                for i in 0..segment.n_tokens() {
                    if let Some(token) = segment.get_token(i) {
                        seg_sum += f64::from(token.token_data().plog);
                        seg_tokens += 1;
                    }
                }
                logprob_sum += seg_sum;
                token_count += seg_tokens;

                // Timestamps are in centiseconds
                segments.push(RawSegment::new(
                    segment.start_timestamp() as f64 / 100.0,
                    segment.end_timestamp() as f64 / 100.0,
                    seg_text,
                    (seg_tokens > 0).then(|| seg_sum / seg_tokens as f64),
                ));
            }

            debug!(segments = segments.len(), %language, "Whisper transcription complete");
            Ok(RawRecognitionResult {
                text,
                language,
                avg_logprob: (token_count > 0).then(|| logprob_sum / token_count as f64),
                segments,
            })
        })
        .await
        .map_err(|e| EngineError::Inference(format!("Whisper task join error: {}", e)))?
    }

    fn name(&self) -> &str {
        "local_whisper"
    }
}
