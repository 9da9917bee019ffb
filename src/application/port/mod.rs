// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`gateway`]: The remote photo service
//! - [`share`]: Native share sheet, clipboard, link opener and download destination
//!
//! # Design Notes
//!
//! - All traits use domain types only (no Iced handles, no `reqwest` types)
//! - Traits are `Send + Sync` so adapters can be shared behind an `Arc`
//! - Remote operations return boxed futures; callers wrap them in `Task::perform`

pub mod gateway;
pub mod share;

// Re-export main types for convenience
pub use gateway::{BinaryPayload, GatewayError, PhotoGateway};
pub use share::{
    Clipboard, ClipboardError, DownloadError, DownloadSink, LinkOpener, NativeShare, OpenError,
    ShareError, SharePayload,
};
