// SPDX-License-Identifier: MPL-2.0
//! Capability detection.
//!
//! Pure functions of the current [`Environment`]. Nothing is cached: the view
//! recomputes [`Capabilities`] on every resize or orientation event.

use std::time::{Duration, Instant};

/// Viewport width under which the layout counts as mobile.
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// Maximum delay between two taps of a double tap.
pub const DOUBLE_TAP_THRESHOLD: Duration = Duration::from_millis(300);

const MOBILE_SIGNATURES: [&str; 7] = [
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
];

/// Snapshot of the runtime environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Platform signature, e.g. `linux x86_64` or a browser user agent.
    pub user_agent: String,
    pub native_share: bool,
    pub clipboard: bool,
}

impl Environment {
    /// Signature of the running platform.
    #[must_use]
    pub fn platform_signature() -> String {
        format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
    }
}

/// Booleans derived from an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub is_mobile: bool,
    pub is_landscape: bool,
    pub can_share_natively: bool,
    pub can_copy: bool,
}

/// Computes the capabilities of `env`.
#[must_use]
pub fn detect(env: &Environment) -> Capabilities {
    Capabilities {
        is_mobile: is_mobile_agent(&env.user_agent) || env.viewport_width < MOBILE_BREAKPOINT,
        is_landscape: env.viewport_width > env.viewport_height,
        can_share_natively: env.native_share,
        can_copy: env.clipboard,
    }
}

/// Whether `user_agent` carries a known mobile device signature.
#[must_use]
pub fn is_mobile_agent(user_agent: &str) -> bool {
    let agent = user_agent.to_ascii_lowercase();
    MOBILE_SIGNATURES
        .iter()
        .any(|signature| agent.contains(signature))
        || agent.contains("opera mini")
        || agent.split(|c: char| !c.is_ascii_alphanumeric()).any(|word| word == "ios")
}

// =============================================================================
// Double tap
// =============================================================================

/// Detects double taps from a stream of tap instants.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapTracker {
    last: Option<Instant>,
}

impl TapTracker {
    /// Records a tap. Returns `true` when it completes a double tap; the
    /// tracker then resets so a third tap starts over.
    pub fn tap(&mut self, at: Instant) -> bool {
        match self.last {
            Some(previous) if at.saturating_duration_since(previous) < DOUBLE_TAP_THRESHOLD => {
                self.last = None;
                true
            }
            _ => {
                self.last = Some(at);
                false
            }
        }
    }
}
