//! # Inference Engine
//!
//! Runs a raw filename through the normalizer and the extractor and bundles
//! the outcome into an [`InferenceRecord`].

use tracing::debug;

use crate::error::Result;
use crate::parser::extractor::Extractor;
use crate::parser::normalizer::{Normalizer, NormalizerConfig};
use crate::types::InferenceRecord;

/// Configuration for the inference engine.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Normalizer settings.
    pub normalizer: NormalizerConfig,
}

impl EngineConfig {
    /// Create a new engine configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the normalizer configuration.
    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Strip additional literal noise tokens during normalization.
    pub fn with_noise_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.normalizer = self.normalizer.with_noise_tokens(tokens);
        self
    }
}

/// Normalizer plus extractor, compiled once and shareable across threads.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    normalizer: Normalizer,
    extractor: Extractor,
}

impl InferenceEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: &EngineConfig) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::with_config(&config.normalizer)?,
            extractor: Extractor::new()?,
        })
    }

    /// Create an engine with the built-in noise stages only.
    pub fn with_defaults() -> Result<Self> {
        Self::new(&EngineConfig::default())
    }

    /// The normalizer stage of the pipeline.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The extractor stage of the pipeline.
    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Infer series, season and episode from a filename.
    ///
    /// Never fails. Fields that no rule resolves take their defaults.
    ///
    /// # Examples
    /// ```
    /// use mediasort_core::InferenceEngine;
    ///
    /// let engine = InferenceEngine::with_defaults().unwrap();
    /// let record = engine.infer("Edens.Zero.S02E01.FRENCH.1080p.WEB.x264-TsundereRaws-Wawacity.uno.mkv");
    ///
    /// assert_eq!(record.series_name(), "Edens Zero");
    /// assert_eq!(record.to_string(), "*Edens Zero* - **S02E01**");
    /// ```
    pub fn infer(&self, raw: &str) -> InferenceRecord {
        let cleaned = self.normalizer.normalize(raw);
        let extraction = self.extractor.extract(&cleaned);
        let record = InferenceRecord::new(extraction, extension_of(raw), cleaned);

        if !record.has_series_name() {
            debug!(raw, cleaned = record.cleaned_text(), "series name unresolved");
        }
        debug!(raw, %record, "inferred");

        record
    }
}

/// Text after the last `.`, or empty when there is none.
fn extension_of(raw: &str) -> &str {
    raw.rsplit_once('.').map_or("", |(_, ext)| ext)
}

/// Convenience function to infer a record with default settings.
pub fn infer(raw: &str) -> Result<InferenceRecord> {
    let engine = InferenceEngine::with_defaults()?;
    Ok(engine.infer(raw))
}

/// Infer with a specific configuration.
pub fn infer_with_config(raw: &str, config: &EngineConfig) -> Result<InferenceRecord> {
    let engine = InferenceEngine::new(config)?;
    Ok(engine.infer(raw))
}
