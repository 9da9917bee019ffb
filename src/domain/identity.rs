// SPDX-License-Identifier: MPL-2.0
//! Photo identities.
//!
//! A photo is addressed by an opaque identifier. Filtered derivatives embed
//! the filter name as a recoverable prefix (`filtered_<filter>_<base>`), so
//! the base photo can always be found again. Framed photos get a brand-new
//! identifier from the server and become a new base.
//!
//! Business logic works on [`PhotoIdentity`]; the prefix string only exists
//! at the gateway and address-bar boundaries.

use super::filter::FilterId;
use std::fmt;

/// Prefix of the derived (filtered) wire form.
pub const FILTERED_PREFIX: &str = "filtered_";

/// A photo identifier, either a base photo or a filtered derivative of one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhotoIdentity {
    Base(String),
    Filtered {
        /// Filter name as found in the marker. Usually a [`FilterId`] wire
        /// name, kept verbatim so unknown markers still resolve to a base.
        marker: String,
        base: String,
    },
}

impl PhotoIdentity {
    /// Parses the wire form, stripping at most one filter marker.
    ///
    /// A second marker stays inside `base`; see [`base_of`].
    ///
    /// Returns `None` for an empty identifier.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Some(rest) = raw.strip_prefix(FILTERED_PREFIX) {
            if let Some((marker, base)) = rest.split_once('_') {
                if !marker.is_empty() && !base.is_empty() {
                    return Some(PhotoIdentity::Filtered {
                        marker: marker.to_string(),
                        base: base.to_string(),
                    });
                }
            }
        }

        Some(PhotoIdentity::Base(raw.to_string()))
    }

    /// Identity of the derivative the server produces when `filter` is
    /// applied to this photo's base.
    #[must_use]
    pub fn filtered(&self, filter: FilterId) -> Self {
        PhotoIdentity::Filtered {
            marker: filter.as_str().to_string(),
            base: self.base_id().to_string(),
        }
    }

    /// Recovers the identity from the `photoUrl` returned by the filter
    /// operation: the last non-empty path segment.
    #[must_use]
    pub fn from_photo_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or_default();
        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .and_then(Self::parse)
    }

    /// The base photo this identity derives from. Idempotent.
    #[must_use]
    pub fn base(&self) -> PhotoIdentity {
        PhotoIdentity::Base(self.base_id().to_string())
    }

    #[must_use]
    pub fn base_id(&self) -> &str {
        match self {
            PhotoIdentity::Base(id) => id,
            PhotoIdentity::Filtered { base, .. } => base,
        }
    }

    #[must_use]
    pub fn is_base(&self) -> bool {
        matches!(self, PhotoIdentity::Base(_))
    }

    /// The applied filter, when the marker names a catalog filter.
    #[must_use]
    pub fn applied_filter(&self) -> Option<FilterId> {
        match self {
            PhotoIdentity::Base(_) => None,
            PhotoIdentity::Filtered { marker, .. } => marker.parse().ok(),
        }
    }

    /// True iff the marker names exactly `filter`.
    #[must_use]
    pub fn is_applied_filter(&self, filter: FilterId) -> bool {
        match self {
            PhotoIdentity::Base(_) => false,
            PhotoIdentity::Filtered { marker, .. } => marker == filter.as_str(),
        }
    }

    /// Wire form sent to the photo service and shown in the address bar.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PhotoIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhotoIdentity::Base(id) => f.write_str(id),
            PhotoIdentity::Filtered { marker, base } => {
                write!(f, "{FILTERED_PREFIX}{marker}_{base}")
            }
        }
    }
}

/// String-level `baseOf`: strips one leading filter marker if present.
///
/// The server never derives from a derivative, so chained markers
/// (`filtered_a_filtered_b_x`) fall outside this function's domain: only
/// the first marker is stripped and the result is not itself a base.
/// Idempotence holds for identities carrying at most one marker.
#[must_use]
pub fn base_of(identity: &str) -> String {
    PhotoIdentity::parse(identity)
        .map(|id| id.base_id().to_string())
        .unwrap_or_default()
}

/// String-level `isAppliedFilter`.
#[must_use]
pub fn is_applied_filter(identity: &str, filter: FilterId) -> bool {
    PhotoIdentity::parse(identity).is_some_and(|id| id.is_applied_filter(filter))
}
