use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while scanning, moving or announcing media files.
#[derive(Debug, Error)]
pub enum LibraryError {
    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configured directory does not exist or is not a directory.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The duration probe could not measure a file.
    #[error("duration probe failed for {}: {reason}", .path.display())]
    Probe {
        /// The probed file.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The webhook request could not be sent.
    #[error("notification request failed: {0}")]
    Notify(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("notification rejected with status {status}: {body}")]
    NotifyRejected {
        /// HTTP status code.
        status: u16,
        /// Response body, if readable.
        body: String,
    },

    /// The worker pool could not be built.
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The inference engine could not be built.
    #[error(transparent)]
    Core(#[from] mediasort_core::MediasortError),
}

impl LibraryError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Self::Io { path, source }
    }
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, LibraryError>;
