// SPDX-License-Identifier: MPL-2.0
//! Download coordinator.
//!
//! A download fetches the photo bytes, stages them in a temporary file, hands
//! the staged file to the [`DownloadSink`] under the server filename and then
//! releases the staged file, whatever the sink reported.

use crate::application::port::gateway::PhotoGateway;
use crate::application::port::share::{DownloadError, DownloadSink};
use crate::domain::photo::PhotoRecord;
use futures_util::future::BoxFuture;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

const OCTET_STREAM: &str = "application/octet-stream";

/// Result of a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved { path: PathBuf },
    Failed { message: String },
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    gateway: Arc<dyn PhotoGateway>,
    sink: Arc<dyn DownloadSink>,
    fallback_filename: String,
}

impl std::fmt::Debug for DownloadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadCoordinator")
            .field("fallback_filename", &self.fallback_filename)
            .finish_non_exhaustive()
    }
}

impl DownloadCoordinator {
    pub fn new(
        gateway: Arc<dyn PhotoGateway>,
        sink: Arc<dyn DownloadSink>,
        fallback_filename: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            sink,
            fallback_filename: fallback_filename.into(),
        }
    }

    /// Saves the photo behind `record`.
    pub fn download(&self, record: PhotoRecord) -> BoxFuture<'static, DownloadOutcome> {
        let this = self.clone();
        Box::pin(async move {
            let payload = match this.gateway.fetch_binary(&record.url).await {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::warn!(error = %err, "photo could not be fetched for download");
                    return DownloadOutcome::Failed {
                        message: err.message().to_string(),
                    };
                }
            };

            let filename = sanitize_filename(record.filename_or(&this.fallback_filename))
                .unwrap_or_else(|| this.fallback_filename.clone());

            match this.save(&payload.bytes, &filename) {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "photo downloaded");
                    DownloadOutcome::Saved { path }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "photo could not be saved");
                    DownloadOutcome::Failed {
                        message: err.to_string(),
                    }
                }
            }
        })
    }

    fn save(&self, bytes: &[u8], filename: &str) -> Result<PathBuf, DownloadError> {
        let staged = StagedDownload::new(bytes)?;
        let result = self.sink.save(staged.path(), filename);
        staged.release();
        result
    }
}

/// Bytes staged on disk for the duration of one save.
struct StagedDownload {
    file: NamedTempFile,
}

impl StagedDownload {
    fn new(bytes: &[u8]) -> Result<Self, DownloadError> {
        let mut file = NamedTempFile::new().map_err(DownloadError::Staging)?;
        file.write_all(bytes).map_err(DownloadError::Staging)?;
        file.flush().map_err(DownloadError::Staging)?;
        Ok(Self { file })
    }

    fn path(&self) -> &std::path::Path {
        self.file.path()
    }

    /// Deletes the staged file now instead of on drop.
    fn release(self) {
        let path = self.file.path().to_path_buf();
        if let Err(err) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %err, "staged download not removed");
        }
    }
}

/// Keeps only the last path component of a server filename.
#[must_use]
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim()
        .trim_start_matches('.');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// MIME type of a payload: the declared one, else a guess from the
/// filename extension, else `application/octet-stream`.
#[must_use]
pub fn mime_type_for(content_type: Option<&str>, filename: &str) -> String {
    if let Some(declared) = content_type
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return declared.to_string();
    }
    image_rs::ImageFormat::from_path(filename)
        .map(|format| format.to_mime_type().to_string())
        .unwrap_or_else(|_| OCTET_STREAM.to_string())
}
