// SPDX-License-Identifier: MPL-2.0
//! System clipboard adapter.

use crate::application::port::share::{Clipboard, ClipboardError};

/// [`Clipboard`] backed by the OS clipboard through `arboard`.
///
/// A fresh `arboard::Clipboard` is opened per write: the handle is not `Sync`
/// on every platform, and some desktops drop ownership when it is held long.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Returns the adapter if a clipboard can be opened right now.
    #[must_use]
    pub fn detect() -> Option<Self> {
        match arboard::Clipboard::new() {
            Ok(_) => Some(Self),
            Err(err) => {
                tracing::debug!(error = %err, "no system clipboard");
                None
            }
        }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        clipboard
            .set_text(text)
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}
