// SPDX-License-Identifier: MPL-2.0
//! Download destination adapter.

use crate::application::port::share::{DownloadError, DownloadSink};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Highest numbered suffix tried before giving up on a free name.
const MAX_SUFFIX: u32 = 999;

/// [`DownloadSink`] writing into a directory, never overwriting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadsFolder {
    directory: PathBuf,
}

impl DownloadsFolder {
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The configured directory, else the platform download directory.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::NoDestination`] when neither exists.
    pub fn resolve(configured: Option<&Path>) -> Result<Self, DownloadError> {
        configured
            .map(Path::to_path_buf)
            .or_else(dirs::download_dir)
            .map(Self::new)
            .ok_or(DownloadError::NoDestination)
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl DownloadSink for DownloadsFolder {
    fn save(&self, staged: &Path, filename: &str) -> Result<PathBuf, DownloadError> {
        fs::create_dir_all(&self.directory).map_err(|source| DownloadError::Save {
            path: self.directory.clone(),
            source,
        })?;

        for candidate in candidates(filename).take(MAX_SUFFIX as usize + 1) {
            let path = self.directory.join(&candidate);
            // create_new reserves the name atomically.
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut target) => {
                    let copied = fs::File::open(staged)
                        .and_then(|mut source| io::copy(&mut source, &mut target));
                    return match copied {
                        Ok(_) => Ok(path),
                        Err(source) => {
                            drop(target);
                            let _ = fs::remove_file(&path);
                            Err(DownloadError::Save { path, source })
                        }
                    };
                }
                Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {}
                Err(source) => return Err(DownloadError::Save { path, source }),
            }
        }

        Err(DownloadError::Save {
            path: self.directory.join(filename),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
        })
    }
}

/// [`DownloadSink`] used when the host has no download directory.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDestination;

impl DownloadSink for NoDestination {
    fn save(&self, _staged: &Path, _filename: &str) -> Result<PathBuf, DownloadError> {
        Err(DownloadError::NoDestination)
    }
}

/// `name.ext`, `name (1).ext`, `name (2).ext`, ...
fn candidates(filename: &str) -> impl Iterator<Item = String> + '_ {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (filename, None),
    };
    (0..=MAX_SUFFIX).map(move |n| match (n, extension) {
        (0, _) => filename.to_string(),
        (n, Some(ext)) => format!("{stem} ({n}).{ext}"),
        (n, None) => format!("{stem} ({n})"),
    })
}
