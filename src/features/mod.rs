//! Feature construction for the two classifiers
//!
//! - `encoder`: label encoding + scaling for the crop model
//! - `aligner`: drop-first one-hot + column reconciliation for the fertilizer model

pub mod aligner;
pub mod encoder;

pub use aligner::{align, align_with_report, AlignmentReport};
pub use encoder::encode;

/// Numeric row in the exact column order of one model
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVector {
    values: Vec<f64>,
}

impl EncodedVector {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// New vector holding `self[positions[i]]` at slot `i`
    ///
    /// Returns `None` if any position is out of range.
    pub fn reorder(&self, positions: &[usize]) -> Option<EncodedVector> {
        positions
            .iter()
            .map(|&p| self.values.get(p).copied())
            .collect::<Option<Vec<f64>>>()
            .map(EncodedVector::new)
    }
}
