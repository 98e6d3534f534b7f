use crate::transport::{TransportError, TransportResult};

use std::panic::Location;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use error_location::ErrorLocation;
use serde::Serialize;

const FALLBACK_MIMETYPE: &str = "application/octet-stream";

/// A local file sent alongside a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    pub path: PathBuf,
}

/// Encoded file contents as the gateway expects them
#[derive(Debug, Clone, Serialize)]
pub struct MediaPayload {
    pub filename: String,
    pub mimetype: String,
    /// Base64 (standard alphabet, padded)
    pub data: String,
}

impl MediaAttachment {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> TransportResult<MediaPayload> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| TransportError::Media {
                path: self.path.clone(),
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(MediaPayload {
            filename: self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string()),
            mimetype: mimetype_for(&self.path).to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}

pub(crate) fn mimetype_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        Some("3gp") => "video/3gpp",
        Some("mp3") => "audio/mpeg",
        Some("ogg") | Some("opus") => "audio/ogg",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        _ => FALLBACK_MIMETYPE,
    }
}
