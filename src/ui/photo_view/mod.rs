// SPDX-License-Identifier: MPL-2.0
//! Photo view component.
//!
//! Owns one photo session: the [`Orchestrator`] for the tracked identity, the
//! share and download coordinators, the decoded confirmed image and the live
//! filter preview rendered from it. Dropping the state ends the session;
//! results of jobs still in flight are then discarded by session id.

mod preview;
mod view;

pub use preview::{PreviewError, PreviewImage, MAX_PREVIEW_EDGE};
pub use view::view;

use crate::application::capability::{self, Capabilities, Environment, TapTracker};
use crate::application::download::{DownloadCoordinator, DownloadOutcome};
use crate::application::orchestrator::{Event, Orchestrator, Outcome, Phase, PreviewMode};
use crate::application::port::gateway::PhotoGateway;
use crate::application::share::{
    CopyOutcome, LinkOutcome, ShareCoordinator, ShareLink, ShareOutcome,
};
use crate::domain::filter::FilterId;
use crate::domain::identity::PhotoIdentity;
use crate::domain::route::{photo_path, AddressBar};
use crate::i18n::fluent::I18n;
use crate::ui::loading::Spinner;
use crate::ui::notifications::{Notification, Topic};
use chrono::TimeZone;
use iced::{Size, Task};
use image_rs::DynamicImage;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the zoom hint stays up on mobile.
const ZOOM_HINT_DURATION: Duration = Duration::from_secs(3);

/// Zoom factor applied by a double tap or double click.
pub const ZOOMED_SCALE: f32 = 2.0;

/// Collaborators shared by every photo session.
#[derive(Clone)]
pub struct Services {
    pub gateway: Arc<dyn PhotoGateway>,
    pub share: ShareCoordinator,
    pub download: DownloadCoordinator,
    /// Origin of the guest-facing page links.
    pub page_origin: String,
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services")
            .field("page_origin", &self.page_origin)
            .finish_non_exhaustive()
    }
}

/// Which options panel is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    None,
    Filters,
    Frames,
    Share,
}

/// The confirmed photo, decoded.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    source: Arc<DynamicImage>,
    image: PreviewImage,
}

#[derive(Debug, Clone)]
struct DisplayedPhoto {
    url: String,
    loaded: LoadedImage,
}

#[derive(Debug, Clone)]
struct RenderedPreview {
    url: String,
    filter: FilterId,
    image: PreviewImage,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// A gateway job finished.
    Orchestrated(Outcome),
    ImageLoaded {
        url: String,
        result: Result<LoadedImage, String>,
    },
    PreviewRendered {
        url: String,
        filter: FilterId,
        result: Result<PreviewImage, String>,
    },
    SelectFilter(FilterId),
    ApplySelectedFilter,
    ApplyFrame(String),
    TogglePanel(Panel),
    Share,
    ShareFinished(ShareOutcome),
    /// Open a manual share link in the browser or mail client.
    OpenLink(String),
    CopyLink(String),
    Download,
    DownloadFinished(DownloadOutcome),
    /// Press or tap on the photo; two within the threshold toggle zoom.
    PhotoPressed,
    /// Edits in the read-only link field are dropped.
    ManualLinkEdited(String),
    Retry,
    Back,
    ViewportResized(Size),
    Tick(Instant),
}

/// Effects the application must handle.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    Notify(Notification),
    /// Tear the session down and load the same route again.
    Retry,
    /// Leave the photo and show the landing view.
    Back,
}

pub struct State {
    orchestrator: Orchestrator,
    services: Services,
    environment: Environment,
    capabilities: Capabilities,
    photo: Option<DisplayedPhoto>,
    image_error: Option<String>,
    preview: Option<RenderedPreview>,
    panel: Panel,
    share_links: Vec<ShareLink>,
    manual_url: Option<String>,
    is_sharing: bool,
    is_downloading: bool,
    zoom: f32,
    taps: TapTracker,
    hint_until: Option<Instant>,
    spinner: Spinner,
    /// Topic of a confirmed transformation whose image is still loading.
    confirming: Option<Topic>,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("orchestrator", &self.orchestrator)
            .field("panel", &self.panel)
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}

impl State {
    /// Starts a session for `identity` and begins loading it.
    pub fn open(
        services: Services,
        identity: PhotoIdentity,
        environment: Environment,
    ) -> (Self, Task<Message>) {
        let address_bar = AddressBar::new(&services.page_origin, &photo_path(&identity));
        let mut orchestrator = Orchestrator::new(Arc::clone(&services.gateway), address_bar);
        let task = run(orchestrator.load_photo(identity));

        let state = Self {
            orchestrator,
            services,
            capabilities: capability::detect(&environment),
            environment,
            photo: None,
            image_error: None,
            preview: None,
            panel: Panel::None,
            share_links: Vec::new(),
            manual_url: None,
            is_sharing: false,
            is_downloading: false,
            zoom: 1.0,
            taps: TapTracker::default(),
            hint_until: None,
            spinner: Spinner::default(),
            confirming: None,
        };
        (state, task)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    #[must_use]
    pub fn identity(&self) -> Option<&PhotoIdentity> {
        self.orchestrator.identity()
    }

    #[must_use]
    pub fn address_bar(&self) -> &AddressBar {
        self.orchestrator.address_bar()
    }

    #[must_use]
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    #[must_use]
    pub fn panel(&self) -> Panel {
        self.panel
    }

    #[must_use]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    #[must_use]
    pub fn is_hint_visible(&self) -> bool {
        self.hint_until.is_some()
    }

    /// Whether the view currently animates (spinner or hint countdown).
    #[must_use]
    pub fn needs_ticks(&self) -> bool {
        matches!(self.orchestrator.phase(), Phase::Idle | Phase::Loading)
            || self.orchestrator.is_busy()
            || self.hint_until.is_some()
            || (matches!(
                self.orchestrator.phase(),
                Phase::Ready | Phase::ApplyingFilter(_) | Phase::ApplyingFrame(_)
            ) && self.photo.is_none()
                && self.image_error.is_none())
    }

    /// The image to draw right now and whether it carries a live preview.
    fn displayed_image(&self) -> Option<(&PreviewImage, bool)> {
        let photo = self.photo.as_ref()?;
        match self.orchestrator.preview() {
            PreviewMode::Raw => Some((&photo.loaded.image, false)),
            PreviewMode::Css(descriptor) => match &self.preview {
                Some(rendered)
                    if rendered.filter == descriptor.id && rendered.url == photo.url =>
                {
                    Some((&rendered.image, true))
                }
                _ => Some((&photo.loaded.image, false)),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------------

    pub fn handle_message(&mut self, message: Message, i18n: &I18n) -> (Effect, Task<Message>) {
        match message {
            Message::Orchestrated(outcome) => self.on_outcome(outcome, i18n),
            Message::ImageLoaded { url, result } => {
                if !self.is_current_url(&url) {
                    return (Effect::None, Task::none());
                }
                match result {
                    Ok(loaded) => {
                        self.image_error = None;
                        self.confirming = None;
                        self.photo = Some(DisplayedPhoto { url, loaded });
                        (Effect::None, self.refresh_preview())
                    }
                    Err(message) => {
                        tracing::warn!(%url, %message, "photo image unavailable");
                        // The previous image belongs to another record.
                        if self.photo.as_ref().is_some_and(|photo| photo.url != url) {
                            self.photo = None;
                            self.preview = None;
                        }
                        self.image_error = Some(message.clone());
                        let effect = match self.confirming.take() {
                            Some(topic) => Effect::Notify(
                                Notification::error("notification-operation-failed")
                                    .with_arg("message", message)
                                    .about(topic),
                            ),
                            None => Effect::None,
                        };
                        (effect, Task::none())
                    }
                }
            }
            Message::PreviewRendered {
                url,
                filter,
                result,
            } => {
                if !self.is_current_url(&url) || self.orchestrator.selected_filter() != filter {
                    return (Effect::None, Task::none());
                }
                match result {
                    Ok(image) => self.preview = Some(RenderedPreview { url, filter, image }),
                    Err(message) => {
                        tracing::warn!(%filter, %message, "preview rendering failed");
                        self.preview = None;
                    }
                }
                (Effect::None, Task::none())
            }
            Message::SelectFilter(filter) => {
                self.orchestrator.select_filter(filter);
                (Effect::None, self.refresh_preview())
            }
            Message::ApplySelectedFilter => {
                let filter = self.orchestrator.selected_filter();
                (Effect::None, run(self.orchestrator.apply_filter(filter)))
            }
            Message::ApplyFrame(name) => (Effect::None, run(self.orchestrator.apply_frame(&name))),
            Message::TogglePanel(panel) => {
                self.panel = if self.panel == panel { Panel::None } else { panel };
                (Effect::None, Task::none())
            }
            Message::Share => self.start_share(),
            Message::ShareFinished(outcome) => self.on_share_finished(outcome),
            Message::OpenLink(url) => self.open_link(&url),
            Message::CopyLink(url) => self.copy_link(&url),
            Message::Download => self.start_download(),
            Message::DownloadFinished(outcome) => {
                self.is_downloading = false;
                let notification = match outcome {
                    DownloadOutcome::Saved { path } => {
                        Notification::success("notification-download-success")
                            .with_arg("path", path.display().to_string())
                    }
                    DownloadOutcome::Failed { message } => {
                        Notification::error("notification-operation-failed")
                            .with_arg("message", message)
                    }
                };
                (
                    Effect::Notify(notification.about(Topic::Download)),
                    Task::none(),
                )
            }
            Message::PhotoPressed => {
                if self.taps.tap(Instant::now()) {
                    self.toggle_zoom();
                }
                (Effect::None, Task::none())
            }
            Message::ManualLinkEdited(_) => (Effect::None, Task::none()),
            Message::Retry => (Effect::Retry, Task::none()),
            Message::Back => (Effect::Back, Task::none()),
            Message::ViewportResized(size) => {
                self.set_viewport(size);
                (Effect::None, Task::none())
            }
            Message::Tick(now) => {
                self.spinner.tick();
                if self.hint_until.is_some_and(|until| now >= until) {
                    self.hint_until = None;
                }
                (Effect::None, Task::none())
            }
        }
    }

    /// Re-reads the viewport and recomputes capabilities.
    pub fn set_viewport(&mut self, size: Size) {
        self.environment.viewport_width = size.width;
        self.environment.viewport_height = size.height;
        self.capabilities = capability::detect(&self.environment);
    }

    fn on_outcome(&mut self, outcome: Outcome, i18n: &I18n) -> (Effect, Task<Message>) {
        let topic = match self.orchestrator.phase() {
            Phase::ApplyingFrame(_) => Topic::Frame,
            _ => Topic::Filter,
        };

        match self.orchestrator.handle(outcome) {
            Event::Ignored | Event::LoadFailed { .. } => (Effect::None, Task::none()),
            Event::Loaded => {
                if self.capabilities.is_mobile {
                    self.hint_until = Some(Instant::now() + ZOOM_HINT_DURATION);
                }
                (Effect::None, self.load_image())
            }
            Event::FilterApplied(filter) => {
                self.panel = Panel::None;
                self.confirming = Some(Topic::Filter);
                let label = i18n.tr(filter.descriptor().label_key);
                let notification = Notification::success("notification-filter-applied")
                    .with_arg("filter", label)
                    .about(Topic::Filter);
                (Effect::Notify(notification), self.load_image())
            }
            Event::FrameApplied(_) => {
                self.panel = Panel::None;
                self.preview = None;
                self.confirming = Some(Topic::Frame);
                let notification =
                    Notification::success("notification-frame-applied").about(Topic::Frame);
                (Effect::Notify(notification), self.load_image())
            }
            Event::OperationFailed { message } => {
                let notification = Notification::error("notification-operation-failed")
                    .with_arg("message", message)
                    .about(topic);
                (Effect::Notify(notification), Task::none())
            }
        }
    }

    fn is_current_url(&self, url: &str) -> bool {
        self.orchestrator
            .record()
            .is_some_and(|record| record.url == url)
    }

    /// Fetches and decodes the confirmed image unless it is already shown.
    fn load_image(&mut self) -> Task<Message> {
        let Some(record) = self.orchestrator.record() else {
            return Task::none();
        };
        if self.photo.as_ref().is_some_and(|photo| photo.url == record.url) {
            self.confirming = None;
            return self.refresh_preview();
        }

        self.image_error = None;
        let url = record.url.clone();
        let gateway = Arc::clone(&self.services.gateway);
        let target = url.clone();
        Task::perform(fetch_image(gateway, target), move |result| {
            Message::ImageLoaded {
                url: url.clone(),
                result,
            }
        })
    }

    /// Renders the selected filter's preview when one is needed and missing.
    fn refresh_preview(&mut self) -> Task<Message> {
        let PreviewMode::Css(descriptor) = self.orchestrator.preview() else {
            return Task::none();
        };
        let Some(photo) = &self.photo else {
            return Task::none();
        };
        if self
            .preview
            .as_ref()
            .is_some_and(|p| p.filter == descriptor.id && p.url == photo.url)
        {
            return Task::none();
        }

        let filter = descriptor.id;
        let url = photo.url.clone();
        let source = Arc::clone(&photo.loaded.source);
        Task::perform(preview::render_async(source, filter), move |result| {
            Message::PreviewRendered {
                url: url.clone(),
                filter,
                result: result.map_err(|err| err.to_string()),
            }
        })
    }

    fn toggle_zoom(&mut self) {
        self.zoom = if self.zoom > 1.0 { 1.0 } else { ZOOMED_SCALE };
    }

    fn start_share(&mut self) -> (Effect, Task<Message>) {
        if self.is_sharing {
            return (Effect::None, Task::none());
        }
        let Some(record) = self.orchestrator.record().cloned() else {
            return (Effect::None, Task::none());
        };
        self.is_sharing = true;
        let page_url = self.orchestrator.address_bar().url();
        (
            Effect::None,
            Task::perform(
                self.services.share.share(record, page_url),
                Message::ShareFinished,
            ),
        )
    }

    fn on_share_finished(&mut self, outcome: ShareOutcome) -> (Effect, Task<Message>) {
        self.is_sharing = false;
        let notification = match outcome {
            ShareOutcome::Shared => Notification::success("notification-share-success"),
            ShareOutcome::Cancelled => return (Effect::None, Task::none()),
            ShareOutcome::LinkCopied { links } => {
                self.share_links = links;
                self.manual_url = None;
                self.panel = Panel::Share;
                Notification::success("notification-link-copied")
            }
            ShareOutcome::ManualLink { url, links } => {
                self.share_links = links;
                self.manual_url = Some(url);
                self.panel = Panel::Share;
                Notification::info("notification-copy-manually")
            }
            ShareOutcome::Failed { message } => {
                Notification::error("notification-operation-failed").with_arg("message", message)
            }
        };
        (
            Effect::Notify(notification.about(Topic::Share)),
            Task::none(),
        )
    }

    fn copy_link(&mut self, url: &str) -> (Effect, Task<Message>) {
        let notification = match self.services.share.copy_link(url) {
            CopyOutcome::Copied => Notification::success("notification-link-copied"),
            CopyOutcome::Failed { url } => {
                self.manual_url = Some(url);
                Notification::info("notification-copy-manually")
            }
        };
        (
            Effect::Notify(notification.about(Topic::CopyLink)),
            Task::none(),
        )
    }

    fn open_link(&mut self, url: &str) -> (Effect, Task<Message>) {
        let notification = match self.services.share.open_link(url) {
            LinkOutcome::Opened => return (Effect::None, Task::none()),
            LinkOutcome::Copied => Notification::success("notification-link-copied"),
            LinkOutcome::Failed { url } => {
                self.manual_url = Some(url);
                Notification::info("notification-copy-manually")
            }
        };
        (
            Effect::Notify(notification.about(Topic::CopyLink)),
            Task::none(),
        )
    }

    fn start_download(&mut self) -> (Effect, Task<Message>) {
        if self.is_downloading {
            return (Effect::None, Task::none());
        }
        let Some(record) = self.orchestrator.record().cloned() else {
            return (Effect::None, Task::none());
        };
        self.is_downloading = true;
        (
            Effect::None,
            Task::perform(
                self.services.download.download(record),
                Message::DownloadFinished,
            ),
        )
    }
}

/// Wraps an orchestrator job into a task.
fn run(job: Option<crate::application::orchestrator::Job>) -> Task<Message> {
    match job {
        Some(job) => Task::perform(job, Message::Orchestrated),
        None => Task::none(),
    }
}

async fn fetch_image(gateway: Arc<dyn PhotoGateway>, url: String) -> Result<LoadedImage, String> {
    let payload = gateway
        .fetch_binary(&url)
        .await
        .map_err(|err| err.message().to_string())?;
    let source = preview::decode_async(payload.bytes)
        .await
        .map_err(|err| err.to_string())?;
    let image = PreviewImage::from_dynamic(&source);
    Ok(LoadedImage { source, image })
}

/// Long date shown under the photo, in the given time zone.
pub fn taken_on<Tz>(timestamp_millis: i64, zone: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = chrono::DateTime::from_timestamp_millis(timestamp_millis)?;
    Some(
        utc.with_timezone(zone)
            .format("%B %-d, %Y · %H:%M")
            .to_string(),
    )
}
