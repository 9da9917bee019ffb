// SPDX-License-Identifier: MPL-2.0
//! Photo records as served by the photo service.

use super::frame::{self, FrameFlags};
use super::identity::PhotoIdentity;

/// The service's view of one photo. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub identity: PhotoIdentity,
    /// Image location, relative to the service origin or absolute.
    pub url: String,
    pub thumbnail_url: Option<String>,
    /// Server-assigned filename. May be empty.
    pub filename: String,
    /// Capture time in epoch milliseconds.
    pub timestamp: Option<i64>,
    pub is_instagram_frame: bool,
    pub is_custom_frame: bool,
    pub custom_frame_name: Option<String>,
}

impl PhotoRecord {
    /// Name of the frame the photo currently carries.
    #[must_use]
    pub fn active_frame(&self) -> &str {
        frame::active_frame(FrameFlags {
            is_instagram_frame: self.is_instagram_frame,
            is_custom_frame: self.is_custom_frame,
            custom_frame_name: self.custom_frame_name.as_deref(),
        })
    }

    /// Server filename, or `fallback` when none was assigned.
    #[must_use]
    pub fn filename_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.filename.trim();
        if trimmed.is_empty() {
            fallback
        } else {
            trimmed
        }
    }

    /// Smaller rendition when available, the full image otherwise.
    #[must_use]
    pub fn preview_url(&self) -> &str {
        self.thumbnail_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(&self.url)
    }
}

#[cfg(test)]
pub(crate) fn sample(identity: &str) -> PhotoRecord {
    PhotoRecord {
        identity: PhotoIdentity::parse(identity).unwrap_or(PhotoIdentity::Base(String::new())),
        url: format!("/uploads/{identity}.jpg"),
        thumbnail_url: None,
        filename: format!("{identity}.jpg"),
        timestamp: Some(1_718_370_000_000),
        is_instagram_frame: false,
        is_custom_frame: false,
        custom_frame_name: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_frame_follows_record_flags() {
        let mut record = sample("abc123");
        assert_eq!(record.active_frame(), frame::STANDARD);

        record.is_custom_frame = true;
        record.custom_frame_name = Some("gold.png".into());
        assert_eq!(record.active_frame(), "gold.png");

        record.is_instagram_frame = true;
        assert_eq!(record.active_frame(), frame::INSTAGRAM);
    }

    #[test]
    fn empty_filename_uses_fallback() {
        let mut record = sample("abc123");
        assert_eq!(record.filename_or("wedding-photo.jpg"), "abc123.jpg");
        record.filename = "  ".into();
        assert_eq!(record.filename_or("wedding-photo.jpg"), "wedding-photo.jpg");
    }

    #[test]
    fn preview_prefers_thumbnail() {
        let mut record = sample("abc123");
        assert_eq!(record.preview_url(), "/uploads/abc123.jpg");
        record.thumbnail_url = Some("/thumbs/abc123.jpg".into());
        assert_eq!(record.preview_url(), "/thumbs/abc123.jpg");
    }
}
