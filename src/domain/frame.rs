// SPDX-License-Identifier: MPL-2.0
//! Frames (server-side overlays).
//!
//! Two builtin frames are always offered. Custom frames come from the photo
//! service's overlay catalog and are opaque beyond their name and preview URL.

/// Name of the standard builtin frame.
pub const STANDARD: &str = "standard";
/// Name of the instagram builtin frame.
pub const INSTAGRAM: &str = "instagram";

const STANDARD_OVERLAY: &str = "wedding-frame.png";
const INSTAGRAM_OVERLAY: &str = "instagram-frame.png";

/// A frame the guest can pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameDescriptor {
    pub name: String,
    /// Preview image, relative to the service origin.
    pub url: Option<String>,
    pub is_builtin: bool,
}

impl FrameDescriptor {
    #[must_use]
    pub fn custom(name: impl Into<String>, url: Option<String>) -> Self {
        Self {
            name: name.into(),
            url,
            is_builtin: false,
        }
    }

    fn builtin(name: &str) -> Self {
        Self {
            name: name.to_string(),
            url: None,
            is_builtin: true,
        }
    }

    /// Overlay name sent to the photo service.
    #[must_use]
    pub fn overlay_name(&self) -> &str {
        overlay_name(&self.name)
    }

    /// Human label for a custom frame: the file stem with `_` and `-`
    /// turned into spaces. Builtins are labelled through i18n instead.
    #[must_use]
    pub fn label(&self) -> String {
        let stem = self.name.split('.').next().unwrap_or_default();
        stem.replace(['_', '-'], " ")
    }
}

/// The two builtin frames, in display order.
#[must_use]
pub fn builtins() -> [FrameDescriptor; 2] {
    [
        FrameDescriptor::builtin(STANDARD),
        FrameDescriptor::builtin(INSTAGRAM),
    ]
}

/// Maps a frame name to the overlay the service knows it by.
#[must_use]
pub fn overlay_name(frame: &str) -> &str {
    match frame {
        STANDARD => STANDARD_OVERLAY,
        INSTAGRAM => INSTAGRAM_OVERLAY,
        other => other,
    }
}

/// Whether a catalog entry duplicates one of the builtins.
#[must_use]
pub fn is_builtin_overlay(name: &str) -> bool {
    name == STANDARD_OVERLAY || name == STANDARD || name.starts_with(INSTAGRAM)
}

/// Keeps only the catalog entries that are genuinely custom.
#[must_use]
pub fn custom_frames(catalog: Vec<FrameDescriptor>) -> Vec<FrameDescriptor> {
    catalog
        .into_iter()
        .filter(|frame| !frame.name.is_empty() && !is_builtin_overlay(&frame.name))
        .map(|frame| FrameDescriptor {
            is_builtin: false,
            ..frame
        })
        .collect()
}

/// Which frame a photo currently carries, as reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFlags<'a> {
    pub is_instagram_frame: bool,
    pub is_custom_frame: bool,
    pub custom_frame_name: Option<&'a str>,
}

/// Name of the active frame for the given flags.
#[must_use]
pub fn active_frame<'a>(flags: FrameFlags<'a>) -> &'a str {
    if flags.is_instagram_frame {
        return INSTAGRAM;
    }
    if flags.is_custom_frame {
        if let Some(name) = flags.custom_frame_name.filter(|name| !name.is_empty()) {
            return name;
        }
    }
    STANDARD
}
