// SPDX-License-Identifier: MPL-2.0
//! Sharing and export port definitions.
//!
//! - [`NativeShare`]: the platform share sheet, when one exists
//! - [`Clipboard`]: text clipboard
//! - [`LinkOpener`]: hands a URL to the system browser or mail client
//! - [`DownloadSink`]: the place downloaded photos end up
//!
//! Each port fails with its own error type so the share coordinator can tell
//! a user cancellation apart from a genuine failure.

use futures_util::future::BoxFuture;
use std::path::{Path, PathBuf};

// =============================================================================
// NativeShare
// =============================================================================

/// A file handed to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShareError {
    /// The guest dismissed the share sheet.
    #[error("share cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

/// Port for the platform share sheet.
pub trait NativeShare: Send + Sync {
    fn share(&self, payload: SharePayload) -> BoxFuture<'_, Result<(), ShareError>>;
}

// =============================================================================
// Clipboard
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Port for the text clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

// =============================================================================
// LinkOpener
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("link could not be opened: {0}")]
pub struct OpenError(pub String);

/// Port for opening web and `mailto:` links outside the app.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), OpenError>;
}

// =============================================================================
// DownloadSink
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("no download directory available")]
    NoDestination,

    #[error("failed to stage download: {0}")]
    Staging(#[source] std::io::Error),

    #[error("failed to save {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Port for the destination of downloaded photos.
pub trait DownloadSink: Send + Sync {
    /// Copies the staged file at `staged` to the destination under
    /// `filename`. Returns where it landed.
    fn save(&self, staged: &Path, filename: &str) -> Result<PathBuf, DownloadError>;
}
