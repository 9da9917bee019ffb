// SPDX-License-Identifier: MPL-2.0
//! `fotobox_guest` is the guest-facing viewer for photo-booth pictures, built
//! with the Iced GUI framework.
//!
//! Guests open one photo from a deep link, preview filters locally, ask the
//! photo service to persist a filter or a frame, and share or download the
//! result.

#![doc(html_root_url = "https://docs.rs/fotobox_guest/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod ui;
