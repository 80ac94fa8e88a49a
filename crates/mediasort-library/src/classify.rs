//! Movie or episode?
//!
//! A release whose name says `Film` or `Movie` is a movie. Otherwise the
//! file's running time decides: anything longer than the configured
//! threshold is a movie. When the duration cannot be measured the file is
//! treated as an episode.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::DEFAULT_MOVIE_THRESHOLD;
use crate::error::{LibraryError, Result};
use crate::scan::MediaFile;

/// Case-sensitive markers that flag a release as a movie.
pub const MOVIE_KEYWORDS: &[&str] = &["Film", "Movie"];

/// Kind of media a file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MediaKind {
    /// Stand-alone feature.
    Movie,
    /// One episode of a series.
    Episode,
}

/// Measures the running time of a media file.
pub trait DurationProbe: Send + Sync {
    /// Returns the duration of the file at `path`.
    fn duration(&self, path: &Path) -> Result<Duration>;
}

/// Probe backed by `ffprobe`, reading the container's `format.duration`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FfprobeProbe;

impl DurationProbe for FfprobeProbe {
    fn duration(&self, path: &Path) -> Result<Duration> {
        let probe_error = |reason: String| LibraryError::Probe {
            path: path.to_path_buf(),
            reason,
        };

        let metadata = ffprobe::ffprobe(path).map_err(|e| probe_error(e.to_string()))?;
        let seconds = metadata
            .format
            .duration
            .ok_or_else(|| probe_error("no duration reported".to_string()))?;

        duration_from_seconds(&seconds)
            .ok_or_else(|| probe_error(format!("unusable duration {seconds:?}")))
    }
}

/// Converts ffprobe's `format.duration` (seconds as text) to a [`Duration`].
fn duration_from_seconds(seconds: &str) -> Option<Duration> {
    let seconds: f64 = seconds.trim().parse().ok()?;
    (seconds.is_finite() && seconds >= 0.0).then(|| Duration::from_secs_f64(seconds))
}

/// Decides whether a file is a movie or an episode.
pub struct Classifier {
    probe: Option<Box<dyn DurationProbe>>,
    threshold: Duration,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("probe", &self.probe.is_some())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(None, DEFAULT_MOVIE_THRESHOLD)
    }
}

impl Classifier {
    /// Classifier using `probe` (if any) against `threshold`.
    pub fn new(probe: Option<Box<dyn DurationProbe>>, threshold: Duration) -> Self {
        Self { probe, threshold }
    }

    /// Replace the duration probe.
    pub fn with_probe(mut self, probe: impl DurationProbe + 'static) -> Self {
        self.probe = Some(Box::new(probe));
        self
    }

    /// The movie duration threshold.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Classifies one file.
    pub fn classify(&self, file: &MediaFile) -> MediaKind {
        if MOVIE_KEYWORDS.iter().any(|k| file.file_name.contains(k)) {
            debug!(file = %file.file_name, "movie keyword in name");
            return MediaKind::Movie;
        }

        let Some(probe) = &self.probe else {
            return MediaKind::Episode;
        };

        match probe.duration(&file.path) {
            Ok(duration) if duration > self.threshold => {
                debug!(file = %file.file_name, ?duration, "longer than movie threshold");
                MediaKind::Movie
            }
            Ok(_) => MediaKind::Episode,
            Err(err) => {
                warn!(file = %file.file_name, %err, "duration probe failed, assuming episode");
                MediaKind::Episode
            }
        }
    }
}
