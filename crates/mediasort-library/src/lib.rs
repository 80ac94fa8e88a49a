//! # MediaSort Library
//!
//! Moves finished downloads into a library laid out as
//!
//! ```text
//! <root>/Films/<name>.<ext>
//! <root>/Series/<name>/S01/<name> - S01E05.<ext>
//! <root>/Unsorted/<original file name>
//! ```
//!
//! using [`mediasort_core`] to infer names, seasons and episodes, and posts
//! a summary of what was added to a webhook.
pub mod classify;
pub mod config;
pub mod error;
pub mod notify;
pub mod placement;
pub mod relocate;
pub mod scan;
pub mod sorter;

pub use classify::{Classifier, DurationProbe, FfprobeProbe, MediaKind};
pub use config::{SortConfig, WebhookConfig};
pub use error::{LibraryError, Result};
pub use notify::{DiscordWebhook, Notifier, build_messages};
pub use placement::{Placement, PlacementKind, plan_destination};
pub use relocate::{Outcome, relocate};
pub use scan::{MediaFile, scan_downloads};
pub use sorter::{PlannedFile, SortReport, Sorter};
