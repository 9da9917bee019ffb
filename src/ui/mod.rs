// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module follows the Elm-style "state down, messages up" pattern.
//!
//! # Screens
//!
//! - [`photo_view`] - One photo with filter previews, frames, sharing and download
//! - [`landing`] - Static fallback for every non-photo route
//! - [`loading`] - Loading card with a tick-driven spinner
//! - [`error_display`] - Full-page error with a retry action
//!
//! # Shared Infrastructure
//!
//! - [`styles`] - Centralized styling (buttons, containers)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`notifications`] - Toast notification system for user feedback

pub mod design_tokens;
pub mod error_display;
pub mod landing;
pub mod loading;
pub mod notifications;
pub mod photo_view;
pub mod styles;
