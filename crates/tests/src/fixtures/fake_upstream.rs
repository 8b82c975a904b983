use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use parking_lot::Mutex;
use tokio::net::TcpListener;

/// Audio bytes the upstream rejects as undecodable.
pub const CORRUPT_AUDIO: &[u8] = b"corrupt";

/// One multipart request received by the fake transcription endpoint.
#[derive(Debug, Clone, Default)]
pub struct ReceivedUpload {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub model: Option<String>,
    pub response_format: Option<String>,
    pub authorization: Option<String>,
}

#[derive(Clone, Default)]
struct UpstreamState {
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

/// A stand-in for an OpenAI-compatible transcription server that also
/// hosts a couple of audio files for URL tests.
pub struct FakeUpstream {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

impl FakeUpstream {
    pub async fn spawn() -> Self {
        let state = UpstreamState::default();
        let received = Arc::clone(&state.received);

        let app = Router::new()
            .route("/v1/audio/transcriptions", post(transcriptions))
            .route("/audio/call.wav", get(call_wav))
            .route("/audio/corrupt.wav", get(corrupt_wav))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake upstream");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, received }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn endpoint(&self) -> String {
        self.url("/v1/audio/transcriptions")
    }

    pub fn received(&self) -> Vec<ReceivedUpload> {
        self.received.lock().clone()
    }
}

async fn transcriptions(
    State(state): State<UpstreamState>,
    headers: axum::http::HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload = ReceivedUpload {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        ..Default::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                upload.filename = field.file_name().map(str::to_string);
                upload.content_type = field.content_type().map(str::to_string);
                upload.bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            "model" => upload.model = field.text().await.ok(),
            "response_format" => upload.response_format = field.text().await.ok(),
            _ => {}
        }
    }

    let corrupt = upload.bytes == CORRUPT_AUDIO;
    state.received.lock().push(upload);

    if corrupt {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": { "message": "Invalid file format." } })),
        );
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "task": "transcribe",
            "language": "english",
            "duration": 3.5,
            "text": " Host: welcome back. Guest: thanks for having me.",
            "segments": [
                { "id": 0, "start": 0.0, "end": 1.4, "text": " Host: welcome back.", "avg_logprob": -0.18 },
                { "id": 1, "start": 1.4, "end": 3.5, "text": " Guest: thanks for having me.", "avg_logprob": -0.27 },
                { "id": 2, "start": 3.5, "end": 3.5, "text": " (laughs) " }
            ]
        })),
    )
}

async fn call_wav() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "audio/wav")], b"RIFF fake wav".to_vec())
}

async fn corrupt_wav() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "audio/wav")], CORRUPT_AUDIO.to_vec())
}
