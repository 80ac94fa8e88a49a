//! # Sort Orchestration
//!
//! Scans the download directory, infers every file in parallel, classifies
//! and plans each one, then performs the moves one after the other and
//! announces what was added.

use std::path::Path;
use std::time::Instant;

use mediasort_core::{InferenceEngine, InferenceRecord};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::classify::{Classifier, DurationProbe, FfprobeProbe, MediaKind};
use crate::config::SortConfig;
use crate::error::{LibraryError, Result};
use crate::notify::{DiscordWebhook, Notifier};
use crate::placement::{Placement, PlacementKind, plan_destination};
use crate::relocate::{Outcome, relocate};
use crate::scan::{MediaFile, scan_downloads};

/// One scanned file with everything decided about it.
#[derive(Debug, Clone)]
pub struct PlannedFile {
    /// The download.
    pub file: MediaFile,
    /// What inference made of its name.
    pub record: InferenceRecord,
    /// Movie or episode.
    pub media_kind: MediaKind,
    /// Where it goes.
    pub placement: Placement,
}

/// Counters and announcements from one sort run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SortReport {
    /// Media files found in the download directory.
    pub scanned: usize,
    /// Files moved into the library.
    pub moved: usize,
    /// Moves only logged because of dry-run mode.
    pub planned: usize,
    /// Files left alone because the destination existed.
    pub skipped: usize,
    /// Files placed under `Unsorted/`.
    pub unsorted: usize,
    /// Files whose move failed.
    pub failed: usize,
    /// Labels of files added to the library, in processing order.
    pub added: Vec<String>,
}

/// Runs the scan → infer → classify → plan → relocate → notify pipeline.
pub struct Sorter {
    config: SortConfig,
    engine: InferenceEngine,
    classifier: Classifier,
    notifier: Option<Box<dyn Notifier>>,
}

impl std::fmt::Debug for Sorter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sorter")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .field("notifier", &self.notifier.is_some())
            .finish()
    }
}

impl Sorter {
    /// Builds a sorter from `config`: ffprobe-backed classification when
    /// probing is enabled, Discord notifications when a webhook is set.
    pub fn new(config: SortConfig) -> Result<Self> {
        let engine = InferenceEngine::new(&config.engine)?;

        let probe: Option<Box<dyn DurationProbe>> = config
            .probe_durations
            .then(|| Box::new(FfprobeProbe) as Box<dyn DurationProbe>);
        let classifier = Classifier::new(probe, config.movie_threshold);

        let notifier = match &config.webhook {
            Some(webhook) => {
                Some(Box::new(DiscordWebhook::new(webhook.clone())?) as Box<dyn Notifier>)
            }
            None => None,
        };

        Ok(Self {
            config,
            engine,
            classifier,
            notifier,
        })
    }

    /// Replace the duration probe.
    pub fn with_probe(mut self, probe: impl DurationProbe + 'static) -> Self {
        self.classifier = self.classifier.with_probe(probe);
        self
    }

    /// Replace the notifier.
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// The run configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Scans and plans every download without moving anything.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotADirectory` if either configured directory
    /// is missing, and `LibraryError::Io` if the download directory cannot be
    /// read.
    pub fn plan(&self) -> Result<Vec<PlannedFile>> {
        if !self.config.library_root.is_dir() {
            return Err(LibraryError::NotADirectory(self.config.library_root.clone()));
        }

        let files = scan_downloads(&self.config.download_dir)?;
        info!(count = files.len(), dir = %self.config.download_dir.display(), "found media files");

        let engine = &self.engine;
        let classifier = &self.classifier;
        let root = self.config.library_root.as_path();
        let plan_all = || {
            files
                .into_par_iter()
                .map(|file| plan_file(engine, classifier, root, file))
                .collect::<Vec<_>>()
        };

        let planned = match self.config.threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?
                .install(plan_all),
            None => plan_all(),
        };

        Ok(planned)
    }

    /// Plans, relocates and announces every download.
    ///
    /// A failed move is logged and counted; the run carries on with the
    /// next file. A failed notification is logged and does not fail the run.
    pub fn run(&self) -> Result<SortReport> {
        let started = Instant::now();
        let planned = self.plan()?;

        let mut report = SortReport {
            scanned: planned.len(),
            ..SortReport::default()
        };

        for PlannedFile { placement, .. } in &planned {
            if placement.kind == PlacementKind::Unsorted {
                report.unsorted += 1;
            }

            match relocate(placement, self.config.dry_run) {
                Ok(Outcome::Moved) => {
                    report.moved += 1;
                    report.added.extend(placement.label.clone());
                }
                Ok(Outcome::Planned) => {
                    report.planned += 1;
                    report.added.extend(placement.label.clone());
                }
                Ok(Outcome::Skipped) => report.skipped += 1,
                Err(err) => {
                    error!(source = %placement.source.display(), %err, "move failed");
                    report.failed += 1;
                }
            }
        }

        self.announce(&report);
        info!(
            moved = report.moved,
            planned = report.planned,
            skipped = report.skipped,
            failed = report.failed,
            elapsed = ?started.elapsed(),
            "sort finished"
        );

        Ok(report)
    }

    fn announce(&self, report: &SortReport) {
        if self.config.dry_run || report.added.is_empty() {
            return;
        }
        let Some(notifier) = &self.notifier else {
            return;
        };

        if let Err(err) = notifier.notify(&report.added) {
            error!(%err, "failed to send library notification");
        }
    }
}

fn plan_file(
    engine: &InferenceEngine,
    classifier: &Classifier,
    root: &Path,
    file: MediaFile,
) -> PlannedFile {
    let record = engine.infer(&file.file_name);
    if !record.has_series_name() {
        warn!(file = %file.file_name, cleaned = record.cleaned_text(), "could not infer a series name");
    }

    let media_kind = classifier.classify(&file);
    let placement = plan_destination(root, &file, &record, media_kind);

    PlannedFile {
        file,
        record,
        media_kind,
        placement,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<Vec<String>>>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, labels: &[String]) -> Result<()> {
            self.sent.lock().unwrap().push(labels.to_vec());
            Ok(())
        }
    }

    struct FixedProbe(Duration);

    impl DurationProbe for FixedProbe {
        fn duration(&self, _path: &Path) -> Result<Duration> {
            Ok(self.0)
        }
    }

    fn setup(names: &[&str]) -> (tempfile::TempDir, tempfile::TempDir) {
        let downloads = tempfile::tempdir().unwrap();
        let library = tempfile::tempdir().unwrap();
        for name in names {
            fs::write(downloads.path().join(name), name.as_bytes()).unwrap();
        }
        (downloads, library)
    }

    fn sorter(downloads: &Path, library: &Path, dry_run: bool) -> Sorter {
        Sorter::new(
            SortConfig::new(downloads, library)
                .with_probe(false)
                .with_dry_run(dry_run)
                .with_threads(2),
        )
        .unwrap()
    }

    #[test]
    fn sorts_episodes_movies_and_unresolved() {
        let (downloads, library) = setup(&[
            "Edens.Zero.S02E01.FRENCH.1080p.WEB.x264-TsundereRaws-Wawacity.uno.mkv",
            "Some.Movie.2019.mkv",
            "Nothing.mkv",
            "partial.S01E01.mkv.part",
            "notes.txt",
        ]);
        let notifier = RecordingNotifier::default();
        let report = sorter(downloads.path(), library.path(), false)
            .with_notifier(notifier.clone())
            .run()
            .unwrap();

        assert_eq!(report.scanned, 3);
        assert_eq!(report.moved, 3);
        assert_eq!(report.unsorted, 1);
        assert_eq!(report.failed, 0);

        let lib = library.path();
        assert!(lib.join("Series/Edens Zero/S02/Edens Zero - S02E01.mkv").is_file());
        assert!(lib.join("Films/Some Movie.mkv").is_file());
        assert!(lib.join("Unsorted/Nothing.mkv").is_file());
        assert!(downloads.path().join("partial.S01E01.mkv.part").is_file());
        assert!(downloads.path().join("notes.txt").is_file());

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let mut labels = sent[0].clone();
        labels.sort();
        assert_eq!(labels, ["*Edens Zero* - **S02E01**", "*Some Movie*"]);
    }

    #[test]
    fn dry_run_moves_nothing_and_stays_quiet() {
        let (downloads, library) = setup(&["Komi-san.wa.Komyushou.Desu.05.VOSTFR.1080p.www.vostfree.tv.mp4"]);
        let notifier = RecordingNotifier::default();
        let report = sorter(downloads.path(), library.path(), true)
            .with_notifier(notifier.clone())
            .run()
            .unwrap();

        assert_eq!(report.planned, 1);
        assert_eq!(report.moved, 0);
        assert_eq!(report.added, ["*Komi san wa Komyushou Desu* - **S01E05**"]);
        assert!(fs::read_dir(library.path()).unwrap().next().is_none());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn existing_destination_is_skipped() {
        let (downloads, library) = setup(&["Dragon Ball 101 Bulma et Son Goku.mkv"]);
        let season = library.path().join("Series/Dragon Ball/S01");
        fs::create_dir_all(&season).unwrap();
        fs::write(season.join("Dragon Ball - S01E101.mkv"), b"old").unwrap();

        let report = sorter(downloads.path(), library.path(), false).run().unwrap();

        assert_eq!(report.skipped, 1);
        assert!(report.added.is_empty());
        assert!(downloads.path().join("Dragon Ball 101 Bulma et Son Goku.mkv").is_file());
    }

    #[test]
    fn probe_routes_long_files_to_films() {
        let (downloads, library) = setup(&["Kimi.no.Na.wa.01.mkv"]);
        let planned = sorter(downloads.path(), library.path(), true)
            .with_probe(FixedProbe(Duration::from_secs(6400)))
            .plan()
            .unwrap();

        assert_eq!(planned.len(), 1);
        assert_eq!(planned[0].media_kind, MediaKind::Movie);
        assert_eq!(planned[0].record.series_name(), "Kimi no Na wa");
        assert_eq!(
            planned[0].placement.destination,
            library.path().join("Films/Kimi no Na wa.mkv")
        );
    }

    #[test]
    fn missing_library_root_is_rejected() {
        let (downloads, library) = setup(&[]);
        let missing = library.path().join("nope");
        let err = sorter(downloads.path(), &missing, true).plan().unwrap_err();
        assert!(matches!(err, LibraryError::NotADirectory(p) if p == missing));
    }
}
