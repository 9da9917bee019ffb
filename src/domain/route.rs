// SPDX-License-Identifier: MPL-2.0
//! Routes and the address bar.
//!
//! `/photo/{id}` is the only deep-linkable route; every other path renders
//! the landing view. The [`AddressBar`] mirrors the page URL guests copy and
//! share, with browser-style push/replace history semantics.

use super::identity::PhotoIdentity;

const PHOTO_SEGMENT: &str = "photo";

/// A resolved route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Photo(PhotoIdentity),
    Landing,
}

impl Route {
    /// Resolves a bare path or an absolute URL. Only the path is considered.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let path = path_of(input.trim());
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [PHOTO_SEGMENT, id] => PhotoIdentity::parse(id).map_or(Route::Landing, Route::Photo),
            _ => Route::Landing,
        }
    }

    /// Path form of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Route::Photo(identity) => photo_path(identity),
            Route::Landing => "/".to_string(),
        }
    }
}

/// `/photo/{identity}`.
#[must_use]
pub fn photo_path(identity: &PhotoIdentity) -> String {
    format!("/{PHOTO_SEGMENT}/{identity}")
}

fn path_of(input: &str) -> &str {
    let without_scheme = match input.find("://") {
        Some(pos) => {
            let rest = &input[pos + 3..];
            rest.find('/').map_or("/", |slash| &rest[slash..])
        }
        None => input,
    };
    without_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
}

/// Current page location plus its history entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressBar {
    origin: String,
    history: Vec<String>,
}

impl AddressBar {
    #[must_use]
    pub fn new(origin: &str, path: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            history: vec![normalize(path)],
        }
    }

    /// Pushes a new history entry.
    pub fn navigate(&mut self, path: &str) {
        self.history.push(normalize(path));
    }

    /// Rewrites the current entry without adding history.
    pub fn replace(&mut self, path: &str) {
        let path = normalize(path);
        match self.history.last_mut() {
            Some(current) => *current = path,
            None => self.history.push(path),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.history.last().map_or("/", String::as_str)
    }

    /// Absolute URL of the current entry.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.origin, self.path())
    }

    #[must_use]
    pub fn route(&self) -> Route {
        Route::parse(self.path())
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

fn normalize(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
