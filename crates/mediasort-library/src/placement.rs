use std::path::{Path, PathBuf};

use mediasort_core::InferenceRecord;
use serde::Serialize;

use crate::classify::MediaKind;
use crate::scan::MediaFile;

/// Library folder for movies.
pub const FILMS_DIR: &str = "Films";
/// Library folder for series.
pub const SERIES_DIR: &str = "Series";
/// Library folder for files whose series name could not be inferred.
pub const UNSORTED_DIR: &str = "Unsorted";

/// Where a file ends up in the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlacementKind {
    /// `Films/<name>.<ext>`
    Movie,
    /// `Series/<name>/Sxx/<name> - SxxExx.<ext>`
    Episode,
    /// `Unsorted/<original file name>`
    Unsorted,
}

/// A planned move of one download into the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    /// Current location.
    pub source: PathBuf,
    /// Target location, including the new file name.
    pub destination: PathBuf,
    /// Layout branch the target belongs to.
    pub kind: PlacementKind,
    /// Text announced once the move succeeds; `None` for unsorted files.
    pub label: Option<String>,
}

/// Plans the destination of `file` under `root`.
///
/// An empty series name always lands in `Unsorted/` under the original file
/// name. Episodes reuse an existing `S01` or `S1` season folder, preferring
/// the zero-padded form, and otherwise plan a new zero-padded one.
pub fn plan_destination(
    root: &Path,
    file: &MediaFile,
    record: &InferenceRecord,
    kind: MediaKind,
) -> Placement {
    let (destination, kind, label) = if !record.has_series_name() {
        (
            root.join(UNSORTED_DIR).join(&file.file_name),
            PlacementKind::Unsorted,
            None,
        )
    } else {
        match kind {
            MediaKind::Movie => (
                root.join(FILMS_DIR)
                    .join(file_name(record.series_name(), record.extension())),
                PlacementKind::Movie,
                Some(record.title_display()),
            ),
            MediaKind::Episode => {
                let series_dir = root.join(SERIES_DIR).join(record.series_name());
                let stem = format!("{} - {}", record.series_name(), record.episode_tag());
                (
                    season_dir(&series_dir, record.season())
                        .join(file_name(&stem, record.extension())),
                    PlacementKind::Episode,
                    Some(record.to_string()),
                )
            }
        }
    };

    Placement {
        source: file.path.clone(),
        destination,
        kind,
        label,
    }
}

/// Existing `S01` or `S1` folder, else the zero-padded name.
fn season_dir(series_dir: &Path, season: u32) -> PathBuf {
    let padded = series_dir.join(format!("S{season:02}"));
    if padded.is_dir() {
        return padded;
    }

    let bare = series_dir.join(format!("S{season}"));
    if bare.is_dir() { bare } else { padded }
}

fn file_name(stem: &str, extension: &str) -> String {
    if extension.is_empty() {
        stem.to_string()
    } else {
        format!("{stem}.{extension}")
    }
}
