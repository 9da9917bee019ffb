// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// Gateway Defaults
// ==========================================================================

/// Origin of the photo service when neither the config file nor the
/// environment provide one.
pub const DEFAULT_API_BASE_URL: &str = "https://fotobox-api.slyrix.com";

/// Path prefix under which the photo service exposes its JSON API.
pub const DEFAULT_API_PREFIX: &str = "/api";

/// Request timeout for gateway calls (in seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Environment variable overriding the gateway origin.
pub const ENV_API_BASE_URL: &str = "FOTOBOX_API_URL";

// ==========================================================================
// Share Defaults
// ==========================================================================

/// Public origin guests open; used to build the shareable page link.
pub const DEFAULT_PAGE_ORIGIN: &str = "https://fotobox.slyrix.com";

/// Title attached to native share payloads.
pub const DEFAULT_SHARE_TITLE: &str = "Wedding Photo";

/// Message attached to shares and social links.
pub const DEFAULT_SHARE_MESSAGE: &str = "Check out this wedding photo! 💕";

/// Subject line of the e-mail share link.
pub const DEFAULT_EMAIL_SUBJECT: &str = "Wedding Photo";

// ==========================================================================
// Download Defaults
// ==========================================================================

/// Filename used when the server did not assign one.
pub const DEFAULT_DOWNLOAD_FILENAME: &str = "wedding-photo.jpg";

// ==========================================================================
// Landing Defaults
// ==========================================================================

/// External site advertised on the landing view.
pub const DEFAULT_WEDDING_SITE_URL: &str = "https://rushelandsivani.com";
