use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{LibraryError, Result};
use crate::placement::Placement;

/// What happened to one planned placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// The file now lives at its destination.
    Moved,
    /// Dry run: the move was only logged.
    Planned,
    /// The destination already existed; nothing was touched.
    Skipped,
}

/// Moves `placement.source` to `placement.destination`, creating parent
/// directories as needed. Never overwrites an existing file.
///
/// # Errors
///
/// Returns `LibraryError::Io` if a directory cannot be created or the file
/// cannot be moved.
pub fn relocate(placement: &Placement, dry_run: bool) -> Result<Outcome> {
    let Placement {
        source,
        destination,
        ..
    } = placement;

    if destination.exists() {
        warn!(destination = %destination.display(), "destination already exists, skipping");
        return Ok(Outcome::Skipped);
    }

    if dry_run {
        info!(
            source = %source.display(),
            destination = %destination.display(),
            "would move"
        );
        return Ok(Outcome::Planned);
    }

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(LibraryError::io(parent))?;
    }

    move_file(source, destination)?;
    info!(
        source = %source.display(),
        destination = %destination.display(),
        "moved"
    );
    Ok(Outcome::Moved)
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    move_with(from, to, |f, t| fs::rename(f, t), |f, t| fs::copy(f, t))
}

/// Renames, falling back to copy and delete when the rename is refused
/// (typically because source and destination sit on different devices).
///
/// A failed copy removes whatever reached `to`. Once the copy is complete
/// the file is in the library, so a source that cannot be deleted is only
/// logged.
fn move_with<R, C>(from: &Path, to: &Path, rename: R, copy: C) -> Result<()>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
    C: FnOnce(&Path, &Path) -> io::Result<u64>,
{
    let Err(err) = rename(from, to) else {
        return Ok(());
    };
    debug!(%err, "rename failed, copying instead");

    if let Err(err) = copy(from, to) {
        match fs::remove_file(to) {
            Ok(()) => debug!(destination = %to.display(), "removed partial copy"),
            Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => {}
            Err(cleanup) => {
                warn!(destination = %to.display(), %cleanup, "could not remove partial copy");
            }
        }
        return Err(LibraryError::io(to)(err));
    }

    if let Err(err) = fs::remove_file(from) {
        warn!(source = %from.display(), %err, "copied but could not remove source");
    }
    Ok(())
}
