//! Fertilizer predictor
//!
//! Model-Attempt → Degenerate-Check → Accept | Fallback.
//!
//! A fertilizer model trained on too little label diversity gives valid but
//! useless answers, so a decoder with `degenerate_class_threshold` labels or
//! fewer is never trusted. Any failure along the model path ends in the
//! heuristic; nothing on this path is returned to the caller as an error.

use super::heuristic::heuristic;
use crate::artifacts::{Classifier, ModelArtifacts};
use crate::error::ModelError;
use crate::features::align_with_report;
use crate::observation::Observation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoder vocabularies at or below this size are treated as degenerate
pub const DEFAULT_DEGENERATE_CLASS_THRESHOLD: usize = 2;

/// Where a fertilizer label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FertilizerSource {
    Model,
    Heuristic,
}

/// Fertilizer label tagged with its source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FertilizerPrediction {
    Model(String),
    Heuristic(String),
}

impl FertilizerPrediction {
    pub fn label(&self) -> &str {
        match self {
            FertilizerPrediction::Model(l) | FertilizerPrediction::Heuristic(l) => l,
        }
    }

    pub fn source(&self) -> FertilizerSource {
        match self {
            FertilizerPrediction::Model(_) => FertilizerSource::Model,
            FertilizerPrediction::Heuristic(_) => FertilizerSource::Heuristic,
        }
    }

    pub fn into_parts(self) -> (String, FertilizerSource) {
        let source = self.source();
        match self {
            FertilizerPrediction::Model(l) | FertilizerPrediction::Heuristic(l) => (l, source),
        }
    }
}

/// Why the model path handed over to the heuristic (logged, never returned)
#[derive(Debug, Clone, PartialEq)]
enum FallbackReason {
    Unavailable(String),
    Inference(ModelError),
    Degenerate { n_labels: usize, threshold: usize },
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Unavailable(reason) => write!(f, "fertilizer model unavailable: {}", reason),
            FallbackReason::Inference(e) => write!(f, "fertilizer inference failed: {}", e),
            FallbackReason::Degenerate { n_labels, threshold } => {
                write!(f, "degenerate fertilizer model ({} labels <= {})", n_labels, threshold)
            }
        }
    }
}

/// Model-Attempt: align, run, decode
fn attempt_model(observation: &Observation, artifacts: &ModelArtifacts) -> Result<(String, usize), FallbackReason> {
    let bundle = artifacts
        .fertilizer
        .require("fertilizer_model")
        .map_err(|e| FallbackReason::Unavailable(e.to_string()))?;

    let (row, report) = align_with_report(observation, artifacts);
    if !report.zero_filled.is_empty() || !report.dropped.is_empty() {
        tracing::debug!(
            zero_filled = ?report.zero_filled,
            dropped = ?report.dropped,
            "Fertilizer columns reconciled"
        );
    }

    let index = bundle
        .model
        .predict_index(row.as_slice())
        .map_err(FallbackReason::Inference)?;

    let label = bundle.label_decoder.get(index).cloned().ok_or_else(|| {
        FallbackReason::Inference(ModelError::UnknownClassIndex {
            index,
            n_labels: bundle.label_decoder.len(),
        })
    })?;

    Ok((label, bundle.label_decoder.len()))
}

/// Degenerate-Check: too few labels to be a meaningful recommender
fn check_degenerate(label: String, n_labels: usize, threshold: usize) -> Result<String, FallbackReason> {
    if n_labels <= threshold {
        return Err(FallbackReason::Degenerate { n_labels, threshold });
    }
    Ok(label)
}

/// Recommend a fertilizer, falling back to the heuristic when the model can't be trusted
///
/// # Arguments
/// * `observation` - Raw field measurements
/// * `crop` - Crop label chosen by the crop predictor
/// * `artifacts` - Loaded model artifacts
/// * `degenerate_class_threshold` - Decoder sizes at or below this are rejected
pub fn predict_fertilizer(
    observation: &Observation,
    crop: &str,
    artifacts: &ModelArtifacts,
    degenerate_class_threshold: usize,
) -> FertilizerPrediction {
    let outcome = attempt_model(observation, artifacts)
        .and_then(|(label, n_labels)| check_degenerate(label, n_labels, degenerate_class_threshold));

    match outcome {
        Ok(label) => FertilizerPrediction::Model(label),
        Err(reason) => {
            let label = heuristic(
                observation.nitrogen,
                observation.phosphorus,
                observation.potassium,
                observation.ph,
                crop,
            );
            tracing::warn!("Using heuristic fertilizer '{}': {}", label, reason);
            FertilizerPrediction::Heuristic(label.to_string())
        }
    }
}
