// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`orchestrator`]: Per-view state machine for loading and transforming a photo
//! - [`share`]: Share fallback chain (native share, clipboard, manual link)
//! - [`download`]: Staged downloads to the download destination
//! - [`capability`]: Environment-derived capability flags
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services

pub mod capability;
pub mod download;
pub mod orchestrator;
pub mod port;
pub mod share;
