// SPDX-License-Identifier: MPL-2.0
//! Link opener adapter.

use crate::application::port::share::{LinkOpener, OpenError};

/// [`LinkOpener`] that hands URLs to the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        // Detached so a browser that stays in the foreground never blocks update().
        open::that_detached(url).map_err(|e| OpenError(e.to_string()))
    }
}
