use thiserror::Error;

/// Errors that can occur while building the inference pipeline.
///
/// Inference itself never fails: a filename that matches no rule produces a
/// record with default fields, not an error.
#[derive(Debug, Error)]
pub enum MediasortError {
    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),

    /// A pattern rule was declared without the capture group it reads.
    #[error("pattern rule {rule:?} has no capture group 1")]
    MissingCapture {
        /// Name of the offending rule.
        rule: &'static str,
    },
}

/// Result type alias for mediasort core operations.
pub type Result<T> = std::result::Result<T, MediasortError>;
