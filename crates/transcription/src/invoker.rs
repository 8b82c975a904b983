use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::asr::{AsrBackend, RawRecognitionResult};
use crate::error::{TranscribeError, TranscribeResult};
use crate::source::AudioSource;

/// Calls the backend and folds every failure, panics included, into
/// [`TranscribeError::RecognitionFailed`].
pub async fn invoke(backend: &dyn AsrBackend, source: &AudioSource) -> TranscribeResult<RawRecognitionResult> {
    let start = Instant::now();
    let outcome = AssertUnwindSafe(backend.transcribe(source)).catch_unwind().await;
    let inference_duration_ms = start.elapsed().as_millis() as u64;

    match outcome {
        Ok(Ok(raw)) => {
            info!(
                backend = %backend.name(),
                source = %source.describe(),
                segments = raw.segments.len(),
                inference_duration_ms,
                "Recognition complete"
            );
            Ok(raw)
        }
        Ok(Err(e)) => {
            warn!(
                backend = %backend.name(),
                source = %source.describe(),
                inference_duration_ms,
                "Recognition failed: {}",
                e
            );
            Err(TranscribeError::RecognitionFailed(e.to_string()))
        }
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            error!(
                backend = %backend.name(),
                source = %source.describe(),
                "Recognition panicked: {}",
                reason
            );
            Err(TranscribeError::RecognitionFailed(reason))
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("engine panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("engine panicked: {}", s)
    } else {
        "engine panicked".to_string()
    }
}
