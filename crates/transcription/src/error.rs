use thiserror::Error;

/// Outcome of a failed transcription request.
///
/// Every variant carries enough context to build a client-visible message;
/// the original engine failure is kept as the `RecognitionFailed` reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscribeError {
    #[error("Model not loaded")]
    ModelNotReady,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Transcription failed: {0}")]
    RecognitionFailed(String),
}

pub type TranscribeResult<T> = Result<T, TranscribeError>;
