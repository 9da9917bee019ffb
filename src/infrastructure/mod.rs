// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the
//! HTTP client, the system clipboard and the file system.
//!
//! # Available Adapters
//!
//! - [`http`]: Photo service over HTTP (implements [`PhotoGateway`])
//! - [`clipboard`]: System clipboard via `arboard` (implements [`Clipboard`])
//! - [`downloads`]: Download directory (implements [`DownloadSink`])
//! - [`opener`]: System browser and mail client via `open` (implements [`LinkOpener`])
//!
//! No [`NativeShare`] adapter exists for desktop targets; the share
//! coordinator falls back to the clipboard tier.
//!
//! [`PhotoGateway`]: crate::application::port::PhotoGateway
//! [`Clipboard`]: crate::application::port::Clipboard
//! [`DownloadSink`]: crate::application::port::DownloadSink
//! [`NativeShare`]: crate::application::port::NativeShare
//! [`LinkOpener`]: crate::application::port::LinkOpener

pub mod clipboard;
pub mod downloads;
pub mod http;
pub mod opener;

// Re-export main types for convenience
pub use clipboard::SystemClipboard;
pub use downloads::{DownloadsFolder, NoDestination};
pub use http::HttpGateway;
pub use opener::SystemOpener;
