// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`identity`]: Base and filtered photo identities ([`PhotoIdentity`](identity::PhotoIdentity))
//! - [`filter`]: The fixed filter catalog and CSS preview expressions
//!   ([`FilterId`](filter::FilterId), [`PreviewOp`](filter::PreviewOp))
//! - [`frame`]: Builtin and custom frames ([`FrameDescriptor`](frame::FrameDescriptor))
//! - [`photo`]: Photo records ([`PhotoRecord`](photo::PhotoRecord))
//! - [`route`]: Deep-link routes and the address bar ([`AddressBar`](route::AddressBar))

pub mod filter;
pub mod frame;
pub mod identity;
pub mod photo;
pub mod route;
