//! Model artifact store
//!
//! Three JSON bundles live in the artifact directory:
//! - `artifacts.json`: categorical encoders + standard scaler (shared preprocessing)
//! - `crop_model.json`: crop classifier, its class labels and feature order
//! - `fert_model.json`: fertilizer classifier, label decoder and one-hot columns
//!
//! Bundles load independently. A bundle that fails to load is kept as
//! `Unavailable` with the failure reason so the pipeline can decide whether the
//! failure is fatal (crop, preprocessing) or absorbed (fertilizer).
//!
//! Artifacts are read once at startup and never mutated; reloading means
//! building a new `ModelArtifacts` and a new engine.

pub mod classifier;

pub use classifier::{Classifier, ClassifierModel, DecisionTree, LinearClassifier, RandomForest, TreeNode};

use crate::error::RecommendError;
use crate::observation::{CATEGORICAL_FIELDS, FEATURE_ORDER};
use anyhow::{Context, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const PREPROCESSING_FILE: &str = "artifacts.json";
pub const CROP_MODEL_FILE: &str = "crop_model.json";
pub const FERTILIZER_MODEL_FILE: &str = "fert_model.json";

/// Per-feature standardization `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Scale one value; a zero scale means the feature was constant at fit time
    pub fn transform_value(&self, idx: usize, value: f64) -> f64 {
        let scale = if self.scale[idx] == 0.0 { 1.0 } else { self.scale[idx] };
        (value - self.mean[idx]) / scale
    }
}

/// Shared preprocessing fit alongside the crop model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preprocessing {
    /// Field name → label vocabulary; a label's index is its trained code
    pub encoders: FxHashMap<String, Vec<String>>,
    pub scaler: StandardScaler,
}

impl Preprocessing {
    fn validate(&self) -> Result<()> {
        for field in CATEGORICAL_FIELDS {
            if !self.encoders.contains_key(field) {
                anyhow::bail!("No encoder for categorical field '{}'", field);
            }
        }
        if self.scaler.mean.len() != FEATURE_ORDER.len() || self.scaler.scale.len() != FEATURE_ORDER.len() {
            anyhow::bail!(
                "Scaler has {} means and {} scales, expected {}",
                self.scaler.mean.len(),
                self.scaler.scale.len(),
                FEATURE_ORDER.len()
            );
        }
        Ok(())
    }
}

/// Crop classifier bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropBundle {
    pub model: ClassifierModel,
    /// Class index → crop label
    pub classes: Vec<String>,
    /// Feature names in the order the model consumes them
    pub feature_order: Vec<String>,
}

impl CropBundle {
    fn validate(&self) -> Result<()> {
        self.model.validate().with_context(|| "Invalid crop model")?;

        if self.classes.len() != self.model.n_classes() {
            anyhow::bail!(
                "Crop model has {} classes but bundle lists {} labels",
                self.model.n_classes(),
                self.classes.len()
            );
        }
        if self.feature_order.len() != FEATURE_ORDER.len() || self.model.n_features() != FEATURE_ORDER.len() {
            anyhow::bail!("Crop model must consume exactly {} features", FEATURE_ORDER.len());
        }
        for name in &self.feature_order {
            if !FEATURE_ORDER.contains(&name.as_str()) {
                anyhow::bail!("Crop model expects unknown feature '{}'", name);
            }
        }
        for name in FEATURE_ORDER {
            if !self.feature_order.iter().any(|f| f == name) {
                anyhow::bail!("Crop model feature order is missing '{}'", name);
            }
        }
        Ok(())
    }

    /// Position of each model input within the canonical feature order
    pub fn canonical_positions(&self) -> Vec<usize> {
        self.feature_order
            .iter()
            .filter_map(|name| FEATURE_ORDER.iter().position(|f| f == name))
            .collect()
    }
}

/// Fertilizer classifier bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizerBundle {
    pub model: ClassifierModel,
    /// Class index → fertilizer label
    pub label_decoder: Vec<String>,
    /// One-hot column layout the model was trained on
    pub columns: Vec<String>,
}

impl FertilizerBundle {
    fn validate(&self) -> Result<()> {
        self.model.validate().with_context(|| "Invalid fertilizer model")?;
        if self.model.n_features() != self.columns.len() {
            anyhow::bail!(
                "Fertilizer model consumes {} features but bundle lists {} columns",
                self.model.n_features(),
                self.columns.len()
            );
        }
        Ok(())
    }
}

/// A bundle that either loaded or recorded why it did not
#[derive(Debug, Clone)]
pub enum Bundle<T> {
    Loaded(T),
    Unavailable(String),
}

impl<T> Bundle<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Bundle::Loaded(b) => Some(b),
            Bundle::Unavailable(_) => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Bundle::Loaded(_))
    }

    /// Borrow the bundle or turn the recorded failure into `ModelUnavailable`
    pub fn require(&self, artifact: &str) -> std::result::Result<&T, RecommendError> {
        match self {
            Bundle::Loaded(b) => Ok(b),
            Bundle::Unavailable(reason) => Err(RecommendError::unavailable(artifact, reason)),
        }
    }

    fn from_result(name: &str, result: Result<T>) -> Self {
        match result {
            Ok(b) => Bundle::Loaded(b),
            Err(e) => {
                tracing::warn!("{} unavailable: {:#}", name, e);
                Bundle::Unavailable(format!("{:#}", e))
            }
        }
    }
}

/// Everything the pipeline reads from the artifact store
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub preprocessing: Bundle<Preprocessing>,
    pub crop: Bundle<CropBundle>,
    pub fertilizer: Bundle<FertilizerBundle>,
}

impl ModelArtifacts {
    /// Wrap already-built bundles, validating each one
    pub fn new(preprocessing: Preprocessing, crop: CropBundle, fertilizer: FertilizerBundle) -> Result<Self> {
        preprocessing.validate()?;
        crop.validate()?;
        fertilizer.validate()?;
        Ok(Self {
            preprocessing: Bundle::Loaded(preprocessing),
            crop: Bundle::Loaded(crop),
            fertilizer: Bundle::Loaded(fertilizer),
        })
    }

    /// Load all bundles from a directory
    ///
    /// Never fails as a whole: each bundle is loaded and validated on its own.
    pub fn load(dir: &Path) -> Self {
        tracing::info!("Loading model artifacts from {:?}", dir);

        let preprocessing = Bundle::from_result(
            "preprocessing",
            read_json::<Preprocessing>(&dir.join(PREPROCESSING_FILE)).and_then(|p| {
                p.validate()?;
                Ok(p)
            }),
        );
        let crop = Bundle::from_result(
            "crop_model",
            read_json::<CropBundle>(&dir.join(CROP_MODEL_FILE)).and_then(|b| {
                b.validate()?;
                Ok(b)
            }),
        );
        let fertilizer = Bundle::from_result(
            "fertilizer_model",
            read_json::<FertilizerBundle>(&dir.join(FERTILIZER_MODEL_FILE)).and_then(|b| {
                b.validate()?;
                Ok(b)
            }),
        );

        if let Some(c) = crop.get() {
            tracing::info!("  Crop model: {} classes", c.classes.len());
        }
        if let Some(f) = fertilizer.get() {
            tracing::info!(
                "  Fertilizer model: {} labels, {} columns",
                f.label_decoder.len(),
                f.columns.len()
            );
        }

        Self { preprocessing, crop, fertilizer }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact file: {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse artifact JSON: {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_forest(n_features: usize, n_classes: usize, class: usize) -> ClassifierModel {
        ClassifierModel::Forest(RandomForest {
            n_features,
            n_classes,
            trees: vec![DecisionTree { nodes: vec![TreeNode::Leaf { class }] }],
        })
    }

    fn crop_bundle() -> CropBundle {
        CropBundle {
            model: leaf_forest(9, 2, 0),
            classes: vec!["maize".into(), "rice".into()],
            feature_order: FEATURE_ORDER.iter().rev().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_canonical_positions_follow_feature_order() {
        let bundle = crop_bundle();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.canonical_positions(), vec![8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_crop_bundle_rejects_unknown_feature() {
        let mut bundle = crop_bundle();
        bundle.feature_order[0] = "elevation".into();
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_crop_bundle_rejects_label_count_mismatch() {
        let mut bundle = crop_bundle();
        bundle.classes.push("wheat".into());
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_scaler_zero_scale_is_identity_shift() {
        let scaler = StandardScaler { mean: vec![2.0], scale: vec![0.0] };
        assert_eq!(scaler.transform_value(0, 5.0), 3.0);
    }

    #[test]
    fn test_missing_directory_marks_everything_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = ModelArtifacts::load(&dir.path().join("nope"));
        assert!(!artifacts.preprocessing.is_loaded());
        assert!(!artifacts.crop.is_loaded());
        assert!(matches!(
            artifacts.fertilizer.require("fertilizer_model"),
            Err(RecommendError::ModelUnavailable { .. })
        ));
    }

    #[test]
    fn test_bundles_load_independently() {
        let dir = tempfile::tempdir().unwrap();
        let fert = FertilizerBundle {
            model: leaf_forest(2, 3, 1),
            label_decoder: vec!["DAP".into(), "Urea".into(), "MOP".into()],
            columns: vec!["N".into(), "P".into()],
        };
        fs::write(dir.path().join(FERTILIZER_MODEL_FILE), serde_json::to_string(&fert).unwrap()).unwrap();
        fs::write(dir.path().join(CROP_MODEL_FILE), "{ not json").unwrap();

        let artifacts = ModelArtifacts::load(dir.path());
        assert!(artifacts.fertilizer.is_loaded());
        assert!(!artifacts.crop.is_loaded());
        assert!(!artifacts.preprocessing.is_loaded());
    }
}
