// SPDX-License-Identifier: MPL-2.0
//! Photo service port definition.
//!
//! This module defines the [`PhotoGateway`] trait wrapping the remote photo
//! service: fetching records, requesting filter and frame derivatives, listing
//! the frame catalog and downloading image bytes.
//!
//! # Design Notes
//!
//! - Identities cross this boundary typed; the wire form is the adapter's job
//! - Error messages supplied by the service are carried verbatim
//! - The trait is `Send + Sync` so one instance can be shared across tasks

use crate::domain::filter::FilterId;
use crate::domain::frame::FrameDescriptor;
use crate::domain::identity::PhotoIdentity;
use crate::domain::photo::PhotoRecord;
use futures_util::future::BoxFuture;

// =============================================================================
// GatewayError
// =============================================================================

/// Errors reported by the photo service or the transport.
///
/// `Display` yields the human-readable message only, so it can be shown to
/// guests as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The identity does not resolve on the service.
    #[error("{message}")]
    NotFound { message: String },

    /// The service answered with a failure.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// The request never got an answer.
    #[error("{0}")]
    Network(String),

    /// The answer could not be understood.
    #[error("{0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Human-readable message, verbatim from the service when it sent one.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            GatewayError::NotFound { message } | GatewayError::Rejected { message, .. } => message,
            GatewayError::Network(message) | GatewayError::InvalidResponse(message) => message,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound { .. })
    }
}

// =============================================================================
// Results
// =============================================================================

/// Bytes of a remote resource plus the type the server declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPayload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

// =============================================================================
// PhotoGateway Trait
// =============================================================================

/// Port for the remote photo service.
pub trait PhotoGateway: Send + Sync {
    /// Fetches the record for `identity`.
    fn fetch_photo(&self, identity: &PhotoIdentity)
        -> BoxFuture<'_, Result<PhotoRecord, GatewayError>>;

    /// Asks the service to persist `filter` applied to `base`. Returns the
    /// identity of the derivative.
    fn apply_filter(
        &self,
        base: &PhotoIdentity,
        filter: FilterId,
    ) -> BoxFuture<'_, Result<PhotoIdentity, GatewayError>>;

    /// Asks the service to compose `overlay` onto `base` as a new version.
    /// Returns the identity of the new base photo.
    fn apply_frame(
        &self,
        base: &PhotoIdentity,
        overlay: &str,
    ) -> BoxFuture<'_, Result<PhotoIdentity, GatewayError>>;

    /// Lists the overlay catalog. Never fails: unavailability is an empty list.
    fn list_frames(&self) -> BoxFuture<'_, Vec<FrameDescriptor>>;

    /// Downloads the resource at `url` (relative to the service origin or
    /// absolute).
    fn fetch_binary(&self, url: &str) -> BoxFuture<'_, Result<BinaryPayload, GatewayError>>;

    /// Absolute form of a service-relative URL.
    fn resolve_url(&self, url: &str) -> String;
}
