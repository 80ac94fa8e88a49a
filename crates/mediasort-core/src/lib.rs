//! # MediaSort Core
//!
//! Heuristic inference of series name, season and episode from release
//! filenames. A raw filename is normalized (noise tokens stripped), then
//! ordered pattern rules extract each field with a fixed fallback, and the
//! outcome is bundled into an immutable [`InferenceRecord`].
//!
//! ## Quick Start
//!
//! ```rust
//! use mediasort_core::InferenceEngine;
//!
//! let engine = InferenceEngine::with_defaults().unwrap();
//! let record = engine.infer("Komi-san.wa.Komyushou.Desu.05.VOSTFR.1080p.www.vostfree.tv.mp4");
//!
//! assert_eq!(record.series_name(), "Komi san wa Komyushou Desu");
//! assert_eq!(record.season(), 1);
//! assert_eq!(record.episode(), 5);
//! ```
pub mod error;
pub mod parser;
pub mod types;

// Re-export primary API
pub use error::{MediasortError, Result};
pub use parser::{
    DEFAULT_EPISODE, DEFAULT_SEASON, EngineConfig, Extraction, Extractor, InferenceEngine,
    NoiseStage, Normalizer, NormalizerConfig, PatternRule, RuleChain, UNRESOLVED_NAME, infer,
    infer_with_config,
};
pub use types::InferenceRecord;
