//! # Filename Normalizer
//!
//! Strips release noise (urls, separators, bracketed groups, container
//! extensions, quality/codec/language markers, hosting and group tags) from a
//! raw filename so the extractor can match space-delimited patterns.
//!
//! Removals in stages 5, 7, 8 and 9 are plain substring matches, not
//! word-boundary matches: a noise token embedded in a longer word is stripped
//! too ("Profit" loses "fit", "income" loses "com"). Downstream naming relies
//! on this exact output, so the stages must not be tightened to `\b`
//! boundaries without treating it as a behavior change.

use regex::Regex;
use tracing::trace;

use crate::error::Result;

/// Container extensions removed wherever they appear in the name.
pub const CONTAINER_TOKENS: &[&str] = &["mkv", "mp4", "avi", "wmv", "flv", "mov", "webm"];

/// Codec markers removed as literal substrings.
pub const CODEC_TOKENS: &[&str] = &["x264", "x265", "HEVC", "MULTI", "AAC"];

/// Language and subtitle markers removed as literal substrings.
///
/// Order matters: `VOSTFR` must be tried before `VO`.
pub const LANGUAGE_TOKENS: &[&str] = &["FRENCH", "VOSTFR", "VOSTA", "VF", "VO"];

/// Hosting sites and release groups removed as literal substrings.
pub const RELEASE_NOISE_TOKENS: &[&str] = &[
    "www",
    "com",
    "vostfree",
    "boats",
    "uno",
    "Wawacity",
    "WEB",
    "TsundereRaws",
    "Tsundere",
    "Raws",
    "fit",
];

/// Configuration for the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Additional literal tokens stripped after the built-in release noise.
    pub extra_noise_tokens: Vec<String>,
}

impl NormalizerConfig {
    /// Create a configuration with the built-in stages only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one literal noise token.
    pub fn with_noise_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.is_empty() {
            self.extra_noise_tokens.push(token);
        }
        self
    }

    /// Add several literal noise tokens.
    pub fn with_noise_tokens<I, S>(self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        tokens
            .into_iter()
            .fold(self, |config, token| config.with_noise_token(token))
    }
}

/// One rewrite step of the normalizer.
#[derive(Debug, Clone)]
pub struct NoiseStage {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl NoiseStage {
    /// Compiles a stage replacing every match of `pattern` with `replacement`.
    pub fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Self> {
        Ok(Self {
            name,
            pattern: Regex::new(pattern)?,
            replacement,
        })
    }

    /// Compiles a stage deleting each literal token, tried in the given order.
    pub fn literal<S: AsRef<str>>(name: &'static str, tokens: &[S]) -> Result<Self> {
        let alternation = tokens
            .iter()
            .map(|t| regex::escape(t.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(name, &format!("({alternation})"), "")
    }

    /// Stage name, used in trace output and tests.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies this stage to `text`.
    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// Turns a raw release filename into cleaned, space-delimited text.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stages: Vec<NoiseStage>,
}

impl Normalizer {
    /// Constructs a normalizer with the built-in stages.
    ///
    /// # Errors
    ///
    /// Returns `MediasortError::Regex` if a stage pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Self::with_config(&NormalizerConfig::default())
    }

    /// Constructs a normalizer, appending the configured extra noise tokens
    /// as one more substring stage after the built-in release noise.
    pub fn with_config(config: &NormalizerConfig) -> Result<Self> {
        let mut stages = vec![
            NoiseStage::new("url", r"(www\..*?\..{2,3})", "")?,
            NoiseStage::new("separator", r"[-_.+]", " ")?,
            NoiseStage::new("parenthesized", r"\(.*?\)", "")?,
            NoiseStage::new("bracketed", r"\[.*?\]", "")?,
            NoiseStage::literal("container", CONTAINER_TOKENS)?,
            NoiseStage::new("quality", r"\b[0-9]{3,4}p\b", "")?,
            NoiseStage::literal("codec", CODEC_TOKENS)?,
            NoiseStage::literal("language", LANGUAGE_TOKENS)?,
            NoiseStage::literal("release", RELEASE_NOISE_TOKENS)?,
        ];

        if !config.extra_noise_tokens.is_empty() {
            stages.push(NoiseStage::literal("custom", config.extra_noise_tokens.as_slice())?);
        }

        Ok(Self { stages })
    }

    /// The ordered rewrite stages, excluding the final whitespace collapse.
    pub fn stages(&self) -> &[NoiseStage] {
        &self.stages
    }

    /// Normalizes `raw`. Never fails; an input made only of noise yields `""`.
    pub fn normalize(&self, raw: &str) -> String {
        let mut text = raw.to_string();
        for stage in &self.stages {
            text = stage.apply(&text);
            trace!(stage = stage.name(), %text, "normalizer stage");
        }

        collapse_whitespace(&text)
    }
}

/// Collapses whitespace runs to a single space and trims both ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
