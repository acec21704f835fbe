//! Fertilizer feature aligner
//!
//! The fertilizer model was trained on a one-hot frame: raw numerics plus
//! `{field}_{value}` indicator columns, with the first vocabulary entry of each
//! field dropped. The live category set can outgrow what the model saw, so the
//! produced columns are reconciled against the bundle's column list:
//! expected-but-missing columns are zero, produced-but-unexpected columns are
//! dropped, and the output follows the bundle's column order exactly.

use super::EncodedVector;
use crate::artifacts::ModelArtifacts;
use crate::observation::{Observation, CATEGORICAL_FIELDS, NUMERIC_FIELDS};
use rustc_hash::FxHashMap;

/// Column bookkeeping from one alignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentReport {
    /// Expected columns the observation did not produce (zero-filled)
    pub zero_filled: Vec<String>,
    /// Produced columns the model does not know (dropped)
    pub dropped: Vec<String>,
}

/// Columns produced from one observation, before reconciliation
fn one_hot_columns(observation: &Observation, artifacts: &ModelArtifacts) -> Vec<(String, f64)> {
    let mut produced: Vec<(String, f64)> = NUMERIC_FIELDS
        .iter()
        .zip(observation.numeric_values())
        .map(|(name, value)| (name.to_string(), value))
        .collect();

    let encoders = artifacts.preprocessing.get().map(|p| &p.encoders);

    for field in CATEGORICAL_FIELDS {
        let value = observation.categorical(field).unwrap_or_default();

        // Drop-first: the reference category has no indicator column
        let first = encoders
            .and_then(|e| e.get(field))
            .and_then(|vocabulary| vocabulary.first());
        if first.map(|f| f == value).unwrap_or(false) {
            continue;
        }

        produced.push((format!("{}_{}", field, value), 1.0));
    }

    produced
}

/// Align an observation to the fertilizer model's columns
///
/// Returns an empty vector when the fertilizer bundle is unavailable.
pub fn align(observation: &Observation, artifacts: &ModelArtifacts) -> EncodedVector {
    align_with_report(observation, artifacts).0
}

/// [`align`] plus which columns were zero-filled or dropped
pub fn align_with_report(observation: &Observation, artifacts: &ModelArtifacts) -> (EncodedVector, AlignmentReport) {
    let expected: &[String] = artifacts
        .fertilizer
        .get()
        .map(|b| b.columns.as_slice())
        .unwrap_or(&[]);

    let produced: FxHashMap<String, f64> = one_hot_columns(observation, artifacts).into_iter().collect();

    let mut report = AlignmentReport::default();
    let values = expected
        .iter()
        .map(|column| match produced.get(column) {
            Some(&v) => v,
            None => {
                report.zero_filled.push(column.clone());
                0.0
            }
        })
        .collect();

    let mut dropped: Vec<String> = produced
        .keys()
        .filter(|name| !expected.contains(*name))
        .cloned()
        .collect();
    dropped.sort();
    report.dropped = dropped;

    (EncodedVector::new(values), report)
}
