//! Error types for the recommendation pipeline
//!
//! `RecommendError` is what callers see. `ModelError` describes why a single
//! classifier could not produce a prediction; the crop path wraps it into
//! `ModelUnavailable`, the fertilizer path absorbs it into the heuristic.

use thiserror::Error;

/// Errors surfaced by [`crate::RecommendationEngine::recommend`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// Observed categorical value was never seen when the encoders were fit
    #[error("unknown {field} '{value}': not in the trained vocabulary")]
    UnknownCategory { field: String, value: String },

    /// A required artifact is missing, corrupt, or failed at inference time
    #[error("model artifact '{artifact}' unavailable: {reason}")]
    ModelUnavailable { artifact: String, reason: String },

    /// Observation value outside its physical range (or not finite)
    #[error("invalid observation: {field} = {value}")]
    InvalidObservation { field: String, value: f64 },
}

impl RecommendError {
    pub(crate) fn unavailable(artifact: &str, reason: impl std::fmt::Display) -> Self {
        RecommendError::ModelUnavailable {
            artifact: artifact.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Failure of a single classifier forward pass
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("malformed model: {0}")]
    Malformed(String),

    #[error("predicted class index {index} outside {n_labels} known labels")]
    UnknownClassIndex { index: usize, n_labels: usize },
}

pub type Result<T> = std::result::Result<T, RecommendError>;
