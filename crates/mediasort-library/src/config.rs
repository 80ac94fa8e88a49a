use std::path::PathBuf;
use std::time::Duration;

use mediasort_core::EngineConfig;

/// Files probed longer than this are treated as movies (50 minutes).
pub const DEFAULT_MOVIE_THRESHOLD: Duration = Duration::from_secs(3000);

/// Display name of the webhook bot.
pub const DEFAULT_BOT_USERNAME: &str = "Anime Bot";

/// Mention placed at the start of every notification message.
pub const DEFAULT_MENTION: &str = "||@everyone||";

/// Where and how library notifications are posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Discord-compatible webhook URL.
    pub url: String,
    /// Username shown for the posted message.
    pub username: String,
    /// Optional mention prefixed to each message.
    pub mention: Option<String>,
}

impl WebhookConfig {
    /// Webhook with the default username and mention.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            username: DEFAULT_BOT_USERNAME.to_string(),
            mention: Some(DEFAULT_MENTION.to_string()),
        }
    }

    /// Set the bot username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set or clear the mention prefix.
    pub fn with_mention(mut self, mention: Option<String>) -> Self {
        self.mention = mention.filter(|m| !m.trim().is_empty());
        self
    }
}

/// Configuration for one sort run.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Directory scanned for finished downloads.
    pub download_dir: PathBuf,
    /// Root of the library (`Films/`, `Series/`, `Unsorted/` live here).
    pub library_root: PathBuf,
    /// Probed duration above which a file is a movie.
    pub movie_threshold: Duration,
    /// Whether to run the duration probe at all.
    pub probe_durations: bool,
    /// Plan and log moves without touching the filesystem.
    pub dry_run: bool,
    /// Worker threads for inference and probing; `None` uses rayon's default.
    pub threads: Option<usize>,
    /// Notification target, if any.
    pub webhook: Option<WebhookConfig>,
    /// Inference engine settings.
    pub engine: EngineConfig,
}

impl SortConfig {
    /// Configuration with defaults for everything but the two directories.
    pub fn new(download_dir: impl Into<PathBuf>, library_root: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            library_root: library_root.into(),
            movie_threshold: DEFAULT_MOVIE_THRESHOLD,
            probe_durations: true,
            dry_run: false,
            threads: None,
            webhook: None,
            engine: EngineConfig::default(),
        }
    }

    /// Set the movie duration threshold.
    pub fn with_movie_threshold(mut self, threshold: Duration) -> Self {
        self.movie_threshold = threshold;
        self
    }

    /// Enable or disable the duration probe.
    pub fn with_probe(mut self, enabled: bool) -> Self {
        self.probe_durations = enabled;
        self
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set the worker thread count. Zero means rayon's default.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = (threads > 0).then_some(threads);
        self
    }

    /// Set the notification webhook.
    pub fn with_webhook(mut self, webhook: Option<WebhookConfig>) -> Self {
        self.webhook = webhook;
        self
    }

    /// Set the inference engine configuration.
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_config_defaults() {
        let config = SortConfig::new("/downloads", "/library");
        assert_eq!(config.download_dir, PathBuf::from("/downloads"));
        assert_eq!(config.library_root, PathBuf::from("/library"));
        assert_eq!(config.movie_threshold, Duration::from_secs(3000));
        assert!(config.probe_durations);
        assert!(!config.dry_run);
        assert!(config.threads.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn sort_config_builder() {
        let config = SortConfig::new("a", "b")
            .with_movie_threshold(Duration::from_secs(60))
            .with_probe(false)
            .with_dry_run(true)
            .with_threads(4)
            .with_webhook(Some(WebhookConfig::new("https://example.invalid/hook")));

        assert_eq!(config.movie_threshold, Duration::from_secs(60));
        assert!(!config.probe_durations);
        assert!(config.dry_run);
        assert_eq!(config.threads, Some(4));
        assert!(config.webhook.is_some());

        assert_eq!(config.with_threads(0).threads, None);
    }

    #[test]
    fn webhook_defaults_and_mention() {
        let hook = WebhookConfig::new("https://example.invalid/hook");
        assert_eq!(hook.username, DEFAULT_BOT_USERNAME);
        assert_eq!(hook.mention.as_deref(), Some(DEFAULT_MENTION));

        let hook = hook.with_username("Media Bot").with_mention(Some("  ".into()));
        assert_eq!(hook.username, "Media Bot");
        assert!(hook.mention.is_none());
    }
}
