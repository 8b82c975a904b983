use std::io::Write;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{TranscribeError, TranscribeResult};

/// Inbound audio as received by the transport layer, not yet validated.
#[derive(Debug, Clone)]
pub enum AudioInput {
    Upload {
        bytes: Bytes,
        content_type: Option<String>,
        filename: Option<String>,
    },
    Url(Option<String>),
}

/// Upload staged in a request-scoped temporary file.
///
/// The file is removed when this value is dropped.
#[derive(Debug)]
pub struct UploadedAudio {
    file: NamedTempFile,
    content_type: String,
    filename: String,
}

impl UploadedAudio {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

/// Audio in a form an ASR backend can consume.
#[derive(Debug)]
pub enum AudioSource {
    Upload(UploadedAudio),
    /// Passed through verbatim; fetching is up to the backend.
    Remote(String),
}

impl AudioSource {
    /// Short description for log lines.
    pub fn describe(&self) -> &str {
        match self {
            AudioSource::Upload(upload) => upload.filename(),
            AudioSource::Remote(url) => url,
        }
    }
}

/// Validates `input` and turns it into an [`AudioSource`].
///
/// Uploads are checked for an `audio/*` content type before anything is
/// written to disk; at most one temp file is created per call.
pub async fn resolve(input: AudioInput, upload_dir: Option<&Path>) -> TranscribeResult<AudioSource> {
    match input {
        AudioInput::Upload {
            bytes,
            content_type,
            filename,
        } => {
            ensure_audio(content_type.as_deref())?;
            let content_type = content_type.unwrap_or_default();
            let filename = filename.unwrap_or_else(|| "upload".to_string());
            let file = stage_upload(bytes, upload_dir.map(Path::to_path_buf)).await?;
            debug!(%filename, path = %file.path().display(), "Upload staged");

            Ok(AudioSource::Upload(UploadedAudio {
                file,
                content_type,
                filename,
            }))
        }
        AudioInput::Url(url) => match url {
            Some(url) if !url.is_empty() => Ok(AudioSource::Remote(url)),
            _ => Err(TranscribeError::InvalidInput("URL is required".to_string())),
        },
    }
}

/// Rejects anything without an `audio/*` content type.
///
/// Transports may call this before buffering a body; [`resolve`] always does.
pub fn ensure_audio(content_type: Option<&str>) -> TranscribeResult<()> {
    match content_type {
        Some(ct) if ct.starts_with("audio/") => Ok(()),
        _ => Err(TranscribeError::InvalidInput(
            "File must be an audio file".to_string(),
        )),
    }
}

async fn stage_upload(bytes: Bytes, dir: Option<PathBuf>) -> TranscribeResult<NamedTempFile> {
    tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("upload-").suffix(".tmp");
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(&bytes)?;
        file.flush()?;
        Ok(file)
    })
    .await
    .map_err(|e| TranscribeError::RecognitionFailed(format!("upload staging task failed: {}", e)))?
    .map_err(|e| TranscribeError::RecognitionFailed(format!("failed to stage upload: {}", e)))
}
