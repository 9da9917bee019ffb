// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::ui::notifications;
use crate::ui::photo_view;
use iced::Size;
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Photo(photo_view::Message),
    Notification(notifications::NotificationMessage),
    /// Open the couple's site from the landing view.
    OpenSiteLink(String),
    /// Copy the couple's site address from the landing view.
    CopySiteLink(String),
    /// Edits in the read-only site field are dropped.
    SiteLinkEdited(String),
    /// Retry building the photo service connection.
    RetryConnection,
    WindowResized(Size),
    Tick(Instant),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Deep link to open, as a path (`/photo/abc123`) or full URL.
    pub deep_link: Option<String>,
    /// Optional config directory override (for settings.toml).
    pub config_dir: Option<String>,
}
