// SPDX-License-Identifier: MPL-2.0
//! Share coordinator.
//!
//! Sharing degrades through explicit tiers, tried in order:
//!
//! 1. [`ShareTier::Native`]: the platform share sheet gets the photo bytes.
//! 2. [`ShareTier::Clipboard`]: the page link is copied and manual share links
//!    are offered.
//! 3. [`ShareTier::ManualLink`]: the link is shown for the guest to copy.
//!
//! Every path ends in exactly one [`ShareOutcome`].
//!
//! Manual share links and the couple's site are opened with the
//! [`LinkOpener`] when one exists and copied to the clipboard otherwise.

use crate::application::download::mime_type_for;
use crate::application::port::gateway::PhotoGateway;
use crate::application::port::share::{
    Clipboard, LinkOpener, NativeShare, ShareError, SharePayload,
};
use crate::config::{Config, DownloadConfig, ShareConfig};
use crate::domain::photo::PhotoRecord;
use futures_util::future::BoxFuture;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::sync::Arc;

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// The share strategy the environment supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareTier {
    Native,
    Clipboard,
    ManualLink,
}

/// Social platforms offered when sharing by link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    WhatsApp,
    Facebook,
    Twitter,
    Email,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::WhatsApp,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Email,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Platform::WhatsApp => "WhatsApp",
            Platform::Facebook => "Facebook",
            Platform::Twitter => "Twitter",
            Platform::Email => "Email",
        }
    }
}

/// A ready-to-open share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub platform: Platform,
    pub url: String,
}

/// Result of a share attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    /// The guest dismissed the share sheet. Neither success nor error.
    Cancelled,
    /// The page link is on the clipboard; manual links are offered.
    LinkCopied { links: Vec<ShareLink> },
    /// Nothing could be copied; the link must be selected by hand.
    ManualLink { url: String, links: Vec<ShareLink> },
    Failed { message: String },
}

/// Result of the standalone "copy link" action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied,
    Failed { url: String },
}

/// Result of opening a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    Opened,
    /// No opener worked; the link went to the clipboard instead.
    Copied,
    /// Neither worked; the link must be selected by hand.
    Failed { url: String },
}

/// Texts used for share payloads and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareTexts {
    pub title: String,
    pub message: String,
    pub email_subject: String,
    pub fallback_filename: String,
}

impl ShareTexts {
    #[must_use]
    pub fn from_config(share: &ShareConfig, download: &DownloadConfig) -> Self {
        Self {
            title: share.title.clone(),
            message: share.message.clone(),
            email_subject: share.email_subject.clone(),
            fallback_filename: download.fallback_filename.clone(),
        }
    }
}

impl Default for ShareTexts {
    fn default() -> Self {
        let config = Config::default();
        Self::from_config(&config.share, &config.download)
    }
}

#[derive(Clone)]
pub struct ShareCoordinator {
    gateway: Arc<dyn PhotoGateway>,
    native: Option<Arc<dyn NativeShare>>,
    clipboard: Option<Arc<dyn Clipboard>>,
    opener: Option<Arc<dyn LinkOpener>>,
    texts: ShareTexts,
}

impl std::fmt::Debug for ShareCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareCoordinator")
            .field("tier", &self.tier())
            .field("texts", &self.texts)
            .finish_non_exhaustive()
    }
}

impl ShareCoordinator {
    pub fn new(
        gateway: Arc<dyn PhotoGateway>,
        native: Option<Arc<dyn NativeShare>>,
        clipboard: Option<Arc<dyn Clipboard>>,
        texts: ShareTexts,
    ) -> Self {
        Self {
            gateway,
            native,
            clipboard,
            opener: None,
            texts,
        }
    }

    /// Opens manual share links with `opener` instead of only copying them.
    #[must_use]
    pub fn with_opener(mut self, opener: Arc<dyn LinkOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    /// First tier the environment supports.
    #[must_use]
    pub fn tier(&self) -> ShareTier {
        if self.native.is_some() {
            ShareTier::Native
        } else if self.clipboard.is_some() {
            ShareTier::Clipboard
        } else {
            ShareTier::ManualLink
        }
    }

    #[must_use]
    pub fn texts(&self) -> &ShareTexts {
        &self.texts
    }

    /// Shares `record`, falling back to the page link at `page_url`.
    pub fn share(&self, record: PhotoRecord, page_url: String) -> BoxFuture<'static, ShareOutcome> {
        let this = self.clone();
        Box::pin(async move {
            match this.native.clone() {
                Some(native) => this.share_natively(native.as_ref(), &record).await,
                None => this.share_link(&page_url),
            }
        })
    }

    async fn share_natively(&self, native: &dyn NativeShare, record: &PhotoRecord) -> ShareOutcome {
        let payload = match self.gateway.fetch_binary(&record.url).await {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "photo could not be fetched for sharing");
                return ShareOutcome::Failed {
                    message: err.message().to_string(),
                };
            }
        };

        let filename = record.filename_or(&self.texts.fallback_filename).to_string();
        let mime_type = mime_type_for(payload.content_type.as_deref(), &filename);
        let share = SharePayload {
            title: self.texts.title.clone(),
            text: self.texts.message.clone(),
            filename,
            mime_type,
            bytes: payload.bytes,
        };

        match native.share(share).await {
            Ok(()) => {
                tracing::info!("photo shared");
                ShareOutcome::Shared
            }
            Err(ShareError::Cancelled) => {
                tracing::debug!("share sheet dismissed");
                ShareOutcome::Cancelled
            }
            Err(ShareError::Failed(message)) => {
                tracing::warn!(%message, "native share failed");
                ShareOutcome::Failed { message }
            }
        }
    }

    fn share_link(&self, page_url: &str) -> ShareOutcome {
        let links = self.links(page_url);
        match self.copy_link(page_url) {
            CopyOutcome::Copied => ShareOutcome::LinkCopied { links },
            CopyOutcome::Failed { url } => ShareOutcome::ManualLink { url, links },
        }
    }

    /// Copies `page_url` to the clipboard.
    pub fn copy_link(&self, page_url: &str) -> CopyOutcome {
        copy_to_clipboard(self.clipboard.as_deref(), page_url)
    }

    /// Opens `url`, copying it when it cannot be opened.
    pub fn open_link(&self, url: &str) -> LinkOutcome {
        open_or_copy(self.opener.as_deref(), self.clipboard.as_deref(), url)
    }

    /// Manual share links for `page_url`.
    #[must_use]
    pub fn links(&self, page_url: &str) -> Vec<ShareLink> {
        Platform::ALL
            .into_iter()
            .map(|platform| ShareLink {
                platform,
                url: share_url(platform, page_url, &self.texts),
            })
            .collect()
    }
}

/// Writes `url` to `clipboard`, if there is one.
pub fn copy_to_clipboard(clipboard: Option<&dyn Clipboard>, url: &str) -> CopyOutcome {
    let Some(clipboard) = clipboard else {
        tracing::debug!("no clipboard available");
        return CopyOutcome::Failed {
            url: url.to_string(),
        };
    };
    match clipboard.write_text(url) {
        Ok(()) => {
            tracing::info!("link copied");
            CopyOutcome::Copied
        }
        Err(err) => {
            tracing::warn!(error = %err, "link could not be copied");
            CopyOutcome::Failed {
                url: url.to_string(),
            }
        }
    }
}

/// Opens `url` with `opener`, falling back to the clipboard.
pub fn open_or_copy(
    opener: Option<&dyn LinkOpener>,
    clipboard: Option<&dyn Clipboard>,
    url: &str,
) -> LinkOutcome {
    if let Some(opener) = opener {
        match opener.open(url) {
            Ok(()) => {
                tracing::info!("link opened");
                return LinkOutcome::Opened;
            }
            Err(err) => tracing::warn!(error = %err, "falling back to the clipboard"),
        }
    }
    match copy_to_clipboard(clipboard, url) {
        CopyOutcome::Copied => LinkOutcome::Copied,
        CopyOutcome::Failed { url } => LinkOutcome::Failed { url },
    }
}

/// Deep link that shares `page_url` on `platform`.
#[must_use]
pub fn share_url(platform: Platform, page_url: &str, texts: &ShareTexts) -> String {
    let message = &texts.message;
    match platform {
        Platform::WhatsApp => format!(
            "https://wa.me/?text={}",
            encode_component(&format!("{message} {page_url}"))
        ),
        Platform::Facebook => format!(
            "https://www.facebook.com/sharer/sharer.php?u={}",
            encode_component(page_url)
        ),
        Platform::Twitter => format!(
            "https://twitter.com/intent/tweet?text={}",
            encode_component(&format!("{message} {page_url}"))
        ),
        Platform::Email => format!(
            "mailto:?subject={}&body={}",
            encode_component(&texts.email_subject),
            encode_component(&format!("{message}\n\n{page_url}"))
        ),
    }
}

/// Percent-encodes everything except the URI-component unreserved set.
fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts() -> ShareTexts {
        ShareTexts {
            title: "Wedding Photo".into(),
            message: "Hi!".into(),
            email_subject: "Wedding Photo".into(),
            fallback_filename: "wedding-photo.jpg".into(),
        }
    }

    #[test]
    fn component_encoding_matches_uri_rules() {
        assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_component("https://x.y/p"), "https%3A%2F%2Fx.y%2Fp");
        assert_eq!(encode_component("💕"), "%F0%9F%92%95");
        assert_eq!(encode_component("(ok)!"), "(ok)!");
    }

    #[test]
    fn whatsapp_and_twitter_carry_message_and_url() {
        let url = "https://fotobox.test/photo/abc";
        assert_eq!(
            share_url(Platform::WhatsApp, url, &texts()),
            "https://wa.me/?text=Hi!%20https%3A%2F%2Ffotobox.test%2Fphoto%2Fabc"
        );
        assert!(share_url(Platform::Twitter, url, &texts())
            .starts_with("https://twitter.com/intent/tweet?text=Hi!%20"));
    }

    #[test]
    fn facebook_carries_only_the_url() {
        assert_eq!(
            share_url(Platform::Facebook, "https://f.t/photo/a", &texts()),
            "https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Ff.t%2Fphoto%2Fa"
        );
    }

    #[test]
    fn email_has_subject_and_two_line_body() {
        assert_eq!(
            share_url(Platform::Email, "https://f.t/p", &texts()),
            "mailto:?subject=Wedding%20Photo&body=Hi!%0A%0Ahttps%3A%2F%2Ff.t%2Fp"
        );
    }

    #[test]
    fn default_texts_come_from_config_defaults() {
        let texts = ShareTexts::default();
        assert_eq!(texts.title, "Wedding Photo");
        assert_eq!(texts.fallback_filename, "wedding-photo.jpg");
    }
}
