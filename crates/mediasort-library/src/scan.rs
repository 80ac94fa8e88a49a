use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{LibraryError, Result};

/// Container extensions picked up from the download directory.
pub const MEDIA_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "wmv", "flv", "mov", "webm"];

/// Suffix of transfers that are still in progress.
pub const PARTIAL_SUFFIX: &str = ".part";

/// A finished download found by [`scan_downloads`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    /// Full path to the file.
    pub path: PathBuf,
    /// The file name alone, as fed to inference.
    pub file_name: String,
}

impl MediaFile {
    /// Builds a media file from a path. Returns `None` when the path has no
    /// UTF-8 file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_str()?.to_string();
        Some(Self { path, file_name })
    }
}

/// Returns `true` for finished downloads with a known container extension.
pub fn is_media_file_name(name: &str) -> bool {
    if name.ends_with(PARTIAL_SUFFIX) {
        return false;
    }

    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MEDIA_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
}

/// Lists media files directly inside `dir`, sorted by file name.
///
/// # Errors
///
/// Returns `LibraryError::NotADirectory` if `dir` is not a directory and
/// `LibraryError::Io` if it cannot be read.
pub fn scan_downloads(dir: &Path) -> Result<Vec<MediaFile>> {
    if !dir.is_dir() {
        return Err(LibraryError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(LibraryError::io(dir))? {
        let entry = entry.map_err(LibraryError::io(dir))?;
        let path = entry.path();

        if !entry.file_type().map_err(LibraryError::io(&path))?.is_file() {
            continue;
        }

        let Some(file) = MediaFile::from_path(&path) else {
            warn!(path = %path.display(), "skipping file with non UTF-8 name");
            continue;
        };

        if is_media_file_name(&file.file_name) {
            files.push(file);
        } else {
            debug!(file = %file.file_name, "not a finished media file");
        }
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(files)
}
