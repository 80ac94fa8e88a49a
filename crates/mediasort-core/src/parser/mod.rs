pub mod extractor;
pub mod normalizer;
pub mod rules;
pub mod unified;

pub use extractor::{DEFAULT_EPISODE, DEFAULT_SEASON, Extraction, Extractor, UNRESOLVED_NAME};
pub use normalizer::{NoiseStage, Normalizer, NormalizerConfig};
pub use rules::{PatternRule, RuleChain};
pub use unified::{EngineConfig, InferenceEngine, infer, infer_with_config};
