pub mod asr;
pub mod config;
pub mod error;
pub mod invoker;
pub mod normalize;
#[cfg(feature = "local-whisper")]
pub mod pipeline;
pub mod readiness;
pub mod service;
pub mod source;

pub use asr::{AsrBackend, EngineError, RawRecognitionResult, RawSegment};
pub use config::TranscriptionConfig;
pub use error::TranscribeError;
pub use readiness::{EngineGate, EngineState};
pub use service::TranscriptionService;
pub use source::{AudioInput, AudioSource};

use serde::{Deserialize, Serialize};

/// One time-bounded span of the transcript as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Seconds from the start of the audio.
    pub start: f64,
    /// Seconds from the start of the audio.
    pub end: f64,
    pub text: String,
    /// Average log-probability reported by the engine, 0 when absent.
    pub confidence: f64,
}

/// Client-facing result of a transcription request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
    pub language: String,
    pub confidence_score: f64,
    /// Lexical estimate from `Name:` prefixes; always at least 1.
    pub speakers_detected: usize,
    pub segments: Vec<Segment>,
    /// Rough estimate in seconds, not derived from segment timestamps.
    pub duration: f64,
}
