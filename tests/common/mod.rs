// SPDX-License-Identifier: MPL-2.0
//! Shared test doubles for the integration suites.
#![allow(dead_code)]

use fotobox_guest::application::port::{
    BinaryPayload, Clipboard, ClipboardError, DownloadError, DownloadSink, GatewayError,
    LinkOpener, NativeShare, OpenError, PhotoGateway, ShareError, SharePayload,
};
use fotobox_guest::domain::filter::FilterId;
use fotobox_guest::domain::frame::FrameDescriptor;
use fotobox_guest::domain::identity::PhotoIdentity;
use fotobox_guest::domain::photo::PhotoRecord;
use futures_util::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Gateway calls in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FetchPhoto(String),
    ApplyFilter { base: String, filter: String },
    ApplyFrame { base: String, overlay: String },
    ListFrames,
    FetchBinary(String),
}

/// Gateway answering from a script.
///
/// Every identity resolves to a plain record unless it was marked missing.
/// Filters derive `filtered_<filter>_<base>`; frames answer with the next
/// scripted identity, or `framed_<base>` when nothing is scripted.
#[derive(Default)]
pub struct ScriptedGateway {
    missing: Mutex<HashSet<String>>,
    filter_error: Mutex<Option<GatewayError>>,
    frame_error: Mutex<Option<GatewayError>>,
    frame_results: Mutex<Vec<String>>,
    catalog: Mutex<Vec<FrameDescriptor>>,
    binary: Mutex<Option<Result<BinaryPayload, GatewayError>>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing(self, identity: &str) -> Self {
        self.missing.lock().unwrap().insert(identity.to_string());
        self
    }

    pub fn with_filter_error(self, err: GatewayError) -> Self {
        *self.filter_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_frame_error(self, err: GatewayError) -> Self {
        *self.frame_error.lock().unwrap() = Some(err);
        self
    }

    pub fn with_frame_result(self, identity: &str) -> Self {
        self.frame_results.lock().unwrap().push(identity.to_string());
        self
    }

    pub fn with_catalog(self, catalog: Vec<FrameDescriptor>) -> Self {
        *self.catalog.lock().unwrap() = catalog;
        self
    }

    pub fn with_binary(self, result: Result<BinaryPayload, GatewayError>) -> Self {
        *self.binary.lock().unwrap() = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

/// Record the service would return for `identity`.
pub fn record_for(identity: &PhotoIdentity) -> PhotoRecord {
    let wire = identity.to_wire();
    PhotoRecord {
        identity: identity.clone(),
        url: format!("/uploads/{wire}.jpg"),
        thumbnail_url: None,
        filename: format!("{wire}.jpg"),
        timestamp: Some(1_718_370_000_000),
        is_instagram_frame: false,
        is_custom_frame: false,
        custom_frame_name: None,
    }
}

pub fn id(raw: &str) -> PhotoIdentity {
    PhotoIdentity::parse(raw).expect("identity should parse")
}

impl PhotoGateway for ScriptedGateway {
    fn fetch_photo(
        &self,
        identity: &PhotoIdentity,
    ) -> BoxFuture<'_, Result<PhotoRecord, GatewayError>> {
        let wire = identity.to_wire();
        self.record(Call::FetchPhoto(wire.clone()));
        let result = if self.missing.lock().unwrap().contains(&wire) {
            Err(GatewayError::NotFound {
                message: "Photo not found".to_string(),
            })
        } else {
            Ok(record_for(identity))
        };
        Box::pin(async move { result })
    }

    fn apply_filter(
        &self,
        base: &PhotoIdentity,
        filter: FilterId,
    ) -> BoxFuture<'_, Result<PhotoIdentity, GatewayError>> {
        self.record(Call::ApplyFilter {
            base: base.to_wire(),
            filter: filter.as_str().to_string(),
        });
        let result = match self.filter_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(base.filtered(filter)),
        };
        Box::pin(async move { result })
    }

    fn apply_frame(
        &self,
        base: &PhotoIdentity,
        overlay: &str,
    ) -> BoxFuture<'_, Result<PhotoIdentity, GatewayError>> {
        self.record(Call::ApplyFrame {
            base: base.to_wire(),
            overlay: overlay.to_string(),
        });
        let result = match self.frame_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => {
                let mut scripted = self.frame_results.lock().unwrap();
                let next = if scripted.is_empty() {
                    format!("framed_{}", base.base_id())
                } else {
                    scripted.remove(0)
                };
                Ok(id(&next))
            }
        };
        Box::pin(async move { result })
    }

    fn list_frames(&self) -> BoxFuture<'_, Vec<FrameDescriptor>> {
        self.record(Call::ListFrames);
        let catalog = self.catalog.lock().unwrap().clone();
        Box::pin(async move { catalog })
    }

    fn fetch_binary(&self, url: &str) -> BoxFuture<'_, Result<BinaryPayload, GatewayError>> {
        self.record(Call::FetchBinary(url.to_string()));
        let result = self.binary.lock().unwrap().clone().unwrap_or_else(|| {
            Ok(BinaryPayload {
                bytes: b"jpeg bytes".to_vec(),
                content_type: Some("image/jpeg".to_string()),
            })
        });
        Box::pin(async move { result })
    }

    fn resolve_url(&self, url: &str) -> String {
        format!("https://photos.test{url}")
    }
}

/// Clipboard that remembers what was written, or refuses everything.
#[derive(Default)]
pub struct RecordingClipboard {
    refuse: bool,
    written: Mutex<Vec<String>>,
}

impl RecordingClipboard {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if self.refuse {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Share sheet answering with a fixed result.
pub struct ScriptedShare {
    result: Result<(), ShareError>,
    payloads: Mutex<Vec<SharePayload>>,
}

impl ScriptedShare {
    pub fn answering(result: Result<(), ShareError>) -> Self {
        Self {
            result,
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub fn payloads(&self) -> Vec<SharePayload> {
        self.payloads.lock().unwrap().clone()
    }
}

impl NativeShare for ScriptedShare {
    fn share(&self, payload: SharePayload) -> BoxFuture<'_, Result<(), ShareError>> {
        self.payloads.lock().unwrap().push(payload);
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}

/// Opener that remembers the links it was given, or refuses everything.
#[derive(Default)]
pub struct ScriptedOpener {
    refuse: bool,
    opened: Mutex<Vec<String>>,
}

impl ScriptedOpener {
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for ScriptedOpener {
    fn open(&self, url: &str) -> Result<(), OpenError> {
        if self.refuse {
            return Err(OpenError("no default browser".to_string()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Sink copying into a directory and remembering the staged paths it saw.
pub struct RecordingSink {
    dir: PathBuf,
    read_only: bool,
    staged: Mutex<Vec<PathBuf>>,
}

impl RecordingSink {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
            read_only: false,
            staged: Mutex::new(Vec::new()),
        }
    }

    /// Sink that sees the staged file but cannot write anything.
    pub fn read_only(dir: &Path) -> Self {
        Self {
            read_only: true,
            ..Self::new(dir)
        }
    }

    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.lock().unwrap().clone()
    }
}

impl DownloadSink for RecordingSink {
    fn save(&self, staged: &Path, filename: &str) -> Result<PathBuf, DownloadError> {
        self.staged.lock().unwrap().push(staged.to_path_buf());
        let target = self.dir.join(filename);
        if self.read_only {
            return Err(DownloadError::Save {
                path: target,
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        std::fs::copy(staged, &target).map_err(|source| DownloadError::Save {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

/// Index of frame names for quick lookups in assertions.
pub fn frame_names(frames: &[FrameDescriptor]) -> HashMap<String, bool> {
    frames
        .iter()
        .map(|frame| (frame.name.clone(), frame.is_builtin))
        .collect()
}
