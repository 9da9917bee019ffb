// SPDX-License-Identifier: MPL-2.0
//! Transformation orchestrator.
//!
//! One [`Orchestrator`] lives for one photo view session. It owns the tracked
//! identity, the tracked base, the confirmed [`PhotoRecord`] and the address
//! bar, and coordinates filter and frame requests against the photo service.
//!
//! Network work is handed out as [`Job`]s (boxed `'static` futures) that the
//! UI runs with `Task::perform`; the resulting [`Outcome`] is fed back through
//! [`Orchestrator::handle`]. Outcomes carry the [`SessionId`] that produced
//! them, so results arriving after the session was replaced are dropped.
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready ⇄ ApplyingFilter / ApplyingFrame
//!                   │                 │
//!                   └──err──▶ Failed ◀┘ (reload error)
//! ```

use crate::application::port::gateway::{GatewayError, PhotoGateway};
use crate::domain::filter::{FilterDescriptor, FilterId};
use crate::domain::frame::{self, FrameDescriptor};
use crate::domain::identity::PhotoIdentity;
use crate::domain::photo::PhotoRecord;
use crate::domain::route::{photo_path, AddressBar};
use futures_util::future::BoxFuture;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

// =============================================================================
// Session identity
// =============================================================================

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one photo view session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    fn next() -> Self {
        Self(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// =============================================================================
// State
// =============================================================================

/// Lifecycle of a photo view session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    ApplyingFilter(FilterId),
    ApplyingFrame(String),
    /// Terminal. Holds the message shown to the guest.
    Failed { message: String, not_found: bool },
}

impl Phase {
    #[must_use]
    pub fn is_transforming(&self) -> bool {
        matches!(self, Phase::ApplyingFilter(_) | Phase::ApplyingFrame(_))
    }
}

/// How the current photo should be drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PreviewMode {
    /// The confirmed image, undecorated.
    Raw,
    /// The confirmed image with a client-side approximation of a filter.
    Css(&'static FilterDescriptor),
}

/// Work to run off the UI thread.
pub type Job = BoxFuture<'static, Outcome>;

/// Result of a [`Job`], tagged with the session that started it.
#[derive(Debug, Clone)]
pub struct Outcome {
    session: SessionId,
    kind: OutcomeKind,
}

#[derive(Debug, Clone)]
enum OutcomeKind {
    Loaded {
        identity: PhotoIdentity,
        result: Result<(PhotoRecord, Vec<FrameDescriptor>), GatewayError>,
    },
    FilterApplied {
        filter: FilterId,
        result: Result<(PhotoIdentity, PhotoRecord), GatewayError>,
    },
    FrameApplied {
        frame: String,
        result: Result<(PhotoIdentity, PhotoRecord), GatewayError>,
    },
}

/// What changed after an [`Outcome`] was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Outcome belonged to another session or no longer applies.
    Ignored,
    Loaded,
    LoadFailed { message: String },
    FilterApplied(FilterId),
    FrameApplied(String),
    /// A filter or frame request failed; confirmed state is untouched.
    OperationFailed { message: String },
}

// =============================================================================
// Orchestrator
// =============================================================================

pub struct Orchestrator {
    gateway: Arc<dyn PhotoGateway>,
    session: SessionId,
    phase: Phase,
    identity: Option<PhotoIdentity>,
    base: Option<PhotoIdentity>,
    record: Option<PhotoRecord>,
    selected_filter: FilterId,
    custom_frames: Vec<FrameDescriptor>,
    address_bar: AddressBar,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("session", &self.session)
            .field("phase", &self.phase)
            .field("identity", &self.identity)
            .field("base", &self.base)
            .field("selected_filter", &self.selected_filter)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Starts a new session in [`Phase::Idle`].
    pub fn new(gateway: Arc<dyn PhotoGateway>, address_bar: AddressBar) -> Self {
        let session = SessionId::next();
        tracing::debug!(?session, "photo session started");
        Self {
            gateway,
            session,
            phase: Phase::Idle,
            identity: None,
            base: None,
            record: None,
            selected_filter: FilterId::Original,
            custom_frames: Vec::new(),
            address_bar,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn identity(&self) -> Option<&PhotoIdentity> {
        self.identity.as_ref()
    }

    /// The base that filter and frame requests target.
    #[must_use]
    pub fn base(&self) -> Option<&PhotoIdentity> {
        self.base.as_ref()
    }

    #[must_use]
    pub fn record(&self) -> Option<&PhotoRecord> {
        self.record.as_ref()
    }

    #[must_use]
    pub fn selected_filter(&self) -> FilterId {
        self.selected_filter
    }

    #[must_use]
    pub fn address_bar(&self) -> &AddressBar {
        &self.address_bar
    }

    #[must_use]
    pub fn custom_frames(&self) -> &[FrameDescriptor] {
        &self.custom_frames
    }

    /// Builtins first, then the custom catalog.
    #[must_use]
    pub fn frames(&self) -> Vec<FrameDescriptor> {
        frame::builtins()
            .into_iter()
            .chain(self.custom_frames.iter().cloned())
            .collect()
    }

    /// Name of the frame the confirmed photo carries.
    #[must_use]
    pub fn active_frame(&self) -> Option<&str> {
        self.record.as_ref().map(PhotoRecord::active_frame)
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.phase.is_transforming()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Loads `identity`. Accepted from `Idle` and `Ready`; the selected filter
    /// is kept.
    pub fn load_photo(&mut self, identity: PhotoIdentity) -> Option<Job> {
        if !matches!(self.phase, Phase::Idle | Phase::Ready) {
            tracing::debug!(phase = ?self.phase, "load ignored");
            return None;
        }

        let path = photo_path(&identity);
        if self.address_bar.path() != path {
            self.address_bar.navigate(&path);
        }

        tracing::debug!(%identity, "loading photo");
        self.phase = Phase::Loading;

        let gateway = Arc::clone(&self.gateway);
        let session = self.session;
        Some(Box::pin(async move {
            let result = match gateway.fetch_photo(&identity).await {
                Ok(record) => {
                    let frames = gateway.list_frames().await;
                    Ok((record, frames))
                }
                Err(err) => Err(err),
            };
            Outcome {
                session,
                kind: OutcomeKind::Loaded { identity, result },
            }
        }))
    }

    /// Selects a filter for preview. No network.
    pub fn select_filter(&mut self, filter: FilterId) {
        self.selected_filter = filter;
    }

    /// How to draw the confirmed photo for the current selection.
    #[must_use]
    pub fn preview(&self) -> PreviewMode {
        let filter = self.selected_filter;
        if filter.is_original() {
            return PreviewMode::Raw;
        }
        match &self.identity {
            Some(identity) if identity.is_applied_filter(filter) => PreviewMode::Raw,
            _ => PreviewMode::Css(filter.descriptor()),
        }
    }

    /// Whether the "apply" action makes sense for the current selection.
    #[must_use]
    pub fn can_apply_selected_filter(&self) -> bool {
        self.phase == Phase::Ready && self.selected_filter.is_server_applicable()
    }

    /// Persists `filter` on the tracked base. No-op for `original`, while a
    /// request is in flight, or outside `Ready`.
    pub fn apply_filter(&mut self, filter: FilterId) -> Option<Job> {
        if !filter.is_server_applicable() || self.phase != Phase::Ready {
            tracing::debug!(%filter, phase = ?self.phase, "apply filter ignored");
            return None;
        }
        let base = self.base.clone()?;

        tracing::debug!(%filter, %base, "applying filter");
        self.phase = Phase::ApplyingFilter(filter);

        let gateway = Arc::clone(&self.gateway);
        let session = self.session;
        Some(Box::pin(async move {
            let result = match gateway.apply_filter(&base, filter).await {
                Ok(derived) => gateway
                    .fetch_photo(&derived)
                    .await
                    .map(|record| (derived, record)),
                Err(err) => Err(err),
            };
            Outcome {
                session,
                kind: OutcomeKind::FilterApplied { filter, result },
            }
        }))
    }

    /// Composes the frame named `frame_name` onto the tracked base. No-op while
    /// a request is in flight or outside `Ready`.
    pub fn apply_frame(&mut self, frame_name: &str) -> Option<Job> {
        if self.phase != Phase::Ready || frame_name.is_empty() {
            tracing::debug!(frame = frame_name, phase = ?self.phase, "apply frame ignored");
            return None;
        }
        let base = self.base.clone()?;
        let overlay = frame::overlay_name(frame_name).to_string();

        tracing::debug!(frame = frame_name, %base, "applying frame");
        self.phase = Phase::ApplyingFrame(frame_name.to_string());

        let gateway = Arc::clone(&self.gateway);
        let session = self.session;
        let frame = frame_name.to_string();
        Some(Box::pin(async move {
            let result = match gateway.apply_frame(&base, &overlay).await {
                Ok(new_base) => gateway
                    .fetch_photo(&new_base)
                    .await
                    .map(|record| (new_base, record)),
                Err(err) => Err(err),
            };
            Outcome {
                session,
                kind: OutcomeKind::FrameApplied { frame, result },
            }
        }))
    }

    /// Applies a finished job's outcome.
    pub fn handle(&mut self, outcome: Outcome) -> Event {
        if outcome.session != self.session {
            tracing::debug!(
                stale = ?outcome.session,
                current = ?self.session,
                "discarding outcome from another session"
            );
            return Event::Ignored;
        }

        match outcome.kind {
            OutcomeKind::Loaded { identity, result } => self.on_loaded(identity, result),
            OutcomeKind::FilterApplied { filter, result } => self.on_filter_applied(filter, result),
            OutcomeKind::FrameApplied { frame, result } => self.on_frame_applied(frame, result),
        }
    }

    fn on_loaded(
        &mut self,
        identity: PhotoIdentity,
        result: Result<(PhotoRecord, Vec<FrameDescriptor>), GatewayError>,
    ) -> Event {
        if self.phase != Phase::Loading {
            return Event::Ignored;
        }
        match result {
            Ok((record, catalog)) => {
                self.base = Some(identity.base());
                self.identity = Some(identity);
                self.record = Some(record);
                self.custom_frames = frame::custom_frames(catalog);
                self.phase = Phase::Ready;
                tracing::debug!(base = ?self.base, "photo ready");
                Event::Loaded
            }
            Err(err) => {
                let message = err.message().to_string();
                tracing::error!(%identity, %message, "photo could not be loaded");
                self.phase = Phase::Failed {
                    message: message.clone(),
                    not_found: err.is_not_found(),
                };
                Event::LoadFailed { message }
            }
        }
    }

    fn on_filter_applied(
        &mut self,
        filter: FilterId,
        result: Result<(PhotoIdentity, PhotoRecord), GatewayError>,
    ) -> Event {
        if self.phase != Phase::ApplyingFilter(filter) {
            return Event::Ignored;
        }
        self.phase = Phase::Ready;
        match result {
            Ok((derived, record)) => {
                self.address_bar.replace(&photo_path(&derived));
                tracing::info!(%filter, identity = %derived, "filter applied");
                self.identity = Some(derived);
                self.record = Some(record);
                Event::FilterApplied(filter)
            }
            Err(err) => {
                tracing::warn!(%filter, error = %err, "filter request failed");
                Event::OperationFailed {
                    message: err.message().to_string(),
                }
            }
        }
    }

    fn on_frame_applied(
        &mut self,
        frame: String,
        result: Result<(PhotoIdentity, PhotoRecord), GatewayError>,
    ) -> Event {
        if self.phase != Phase::ApplyingFrame(frame.clone()) {
            return Event::Ignored;
        }
        self.phase = Phase::Ready;
        match result {
            Ok((new_base, record)) => {
                self.address_bar.replace(&photo_path(&new_base));
                tracing::info!(%frame, identity = %new_base, "frame applied");
                self.base = Some(new_base.clone());
                self.identity = Some(new_base);
                self.record = Some(record);
                self.selected_filter = FilterId::Original;
                Event::FrameApplied(frame)
            }
            Err(err) => {
                tracing::warn!(%frame, error = %err, "frame request failed");
                Event::OperationFailed {
                    message: err.message().to_string(),
                }
            }
        }
    }
}
