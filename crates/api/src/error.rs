use audioscribe_transcription::TranscribeError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    ServiceUnavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Every error leaves one log line carrying its reason: `error!` for 500s,
/// `warn!` for everything the client can act on.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, detail) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::ServiceUnavailable(msg) => ("service_unavailable", msg),
            ApiError::Internal(msg) => ("internal", msg),
        };

        if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!(status = status.as_u16(), %detail, "Request failed");
        } else {
            warn!(status = status.as_u16(), %detail, "Request rejected");
        }

        let body = ErrorResponse {
            error: error_type.to_string(),
            detail,
        };

        (status, Json(body)).into_response()
    }
}

impl From<TranscribeError> for ApiError {
    fn from(err: TranscribeError) -> Self {
        let detail = err.to_string();
        match err {
            TranscribeError::ModelNotReady => ApiError::ServiceUnavailable(detail),
            TranscribeError::InvalidInput(_) => ApiError::BadRequest(detail),
            TranscribeError::RecognitionFailed(_) => ApiError::Internal(detail),
        }
    }
}
