use audioscribe_transcription::{AudioInput, TranscribeError, TranscriptionResponse, source};
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::MultipartRejection,
        rejection::JsonRejection,
    },
};
use serde::Deserialize;
use tracing::info;

use crate::{error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct TranscribeUrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// POST /transcribe
/// Transcribe an uploaded audio file. Field: `file` (binary, `audio/*`).
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    // Refuse before buffering the body
    if !state.transcription.is_ready() {
        return Err(TranscribeError::ModelNotReady.into());
    }

    let mut multipart =
        multipart.map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e.body_text())))?;

    // First `file` part wins; anything after it is left unread.
    let mut input: Option<AudioInput> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        source::ensure_audio(content_type.as_deref())?;

        let filename = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
        input = Some(AudioInput::Upload {
            bytes,
            content_type,
            filename,
        });
        break;
    }

    let input = input.ok_or_else(|| ApiError::BadRequest("Missing 'file' field".to_string()))?;
    if let AudioInput::Upload { filename, bytes, .. } = &input {
        info!(filename = ?filename, bytes = bytes.len(), "Transcribing upload");
    }

    let response = state.transcription.transcribe(input).await?;
    Ok(Json(response))
}

/// POST /transcribe-url
/// Transcribe audio from a URL. Body: `{"url": "..."}`.
pub async fn from_url(
    State(state): State<AppState>,
    body: Result<Json<TranscribeUrlRequest>, JsonRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    if !state.transcription.is_ready() {
        return Err(TranscribeError::ModelNotReady.into());
    }

    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    info!(url = ?body.url, "Transcribing from URL");

    let response = state
        .transcription
        .transcribe(AudioInput::Url(body.url))
        .await?;
    Ok(Json(response))
}
