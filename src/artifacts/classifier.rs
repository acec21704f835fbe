//! Serialized classifiers
//!
//! Two model families cover what the training notebooks export:
//! - `forest`: majority vote over decision trees (random forest)
//! - `linear`: argmax of `w·x + b` per class (multinomial logistic regression)
//!
//! Both return a class *index*; mapping the index to a label is the bundle's job.
//! Ties resolve to the lowest class index, which is the model's own class order.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// Anything that maps a feature row to a class index
pub trait Classifier: Send + Sync {
    /// Number of input features the model was trained on
    fn n_features(&self) -> usize;

    /// Number of output classes
    fn n_classes(&self) -> usize;

    /// Top-1 class index for a single row
    fn predict_index(&self, features: &[f64]) -> Result<usize, ModelError>;
}

/// Classifier as stored in an artifact bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierModel {
    Forest(RandomForest),
    Linear(LinearClassifier),
}

impl ClassifierModel {
    /// Structural checks run once at load time
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            ClassifierModel::Forest(f) => f.validate(),
            ClassifierModel::Linear(l) => l.validate(),
        }
    }
}

impl Classifier for ClassifierModel {
    fn n_features(&self) -> usize {
        match self {
            ClassifierModel::Forest(f) => f.n_features(),
            ClassifierModel::Linear(l) => l.n_features(),
        }
    }

    fn n_classes(&self) -> usize {
        match self {
            ClassifierModel::Forest(f) => f.n_classes(),
            ClassifierModel::Linear(l) => l.n_classes(),
        }
    }

    fn predict_index(&self, features: &[f64]) -> Result<usize, ModelError> {
        match self {
            ClassifierModel::Forest(f) => f.predict_index(features),
            ClassifierModel::Linear(l) => l.predict_index(features),
        }
    }
}

// ============================================================================
// Decision forest
// ============================================================================

/// One node of a flattened decision tree (root at index 0)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to a leaf
    ///
    /// Bounded by the node count so a cyclic tree cannot loop forever.
    fn leaf_class(&self, features: &[f64]) -> Result<usize, ModelError> {
        let mut idx = 0;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { class }) => return Ok(*class),
                Some(TreeNode::Split { feature, threshold, left, right }) => {
                    let value = features.get(*feature).copied().ok_or_else(|| {
                        ModelError::Malformed(format!("split on missing feature {}", feature))
                    })?;
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Malformed(format!("node index {} out of range", idx)));
                }
            }
        }
        Err(ModelError::Malformed("tree contains a cycle".to_string()))
    }
}

/// Majority-vote ensemble of decision trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub n_features: usize,
    pub n_classes: usize,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Malformed("forest has no trees".to_string()));
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(ModelError::Malformed(format!("tree {} has no nodes", t)));
            }
            for node in &tree.nodes {
                match node {
                    TreeNode::Leaf { class } if *class >= self.n_classes => {
                        return Err(ModelError::Malformed(format!(
                            "tree {} leaf class {} >= n_classes {}",
                            t, class, self.n_classes
                        )));
                    }
                    TreeNode::Split { feature, left, right, .. } => {
                        if *feature >= self.n_features {
                            return Err(ModelError::Malformed(format!(
                                "tree {} splits on feature {} >= n_features {}",
                                t, feature, self.n_features
                            )));
                        }
                        if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                            return Err(ModelError::Malformed(format!(
                                "tree {} has a child index out of range",
                                t
                            )));
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn predict_index(&self, features: &[f64]) -> Result<usize, ModelError> {
        check_width(self.n_features, features)?;

        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            let class = tree.leaf_class(features)?;
            let slot = votes.get_mut(class).ok_or_else(|| {
                ModelError::Malformed(format!("leaf class {} >= n_classes {}", class, self.n_classes))
            })?;
            *slot += 1;
        }

        // First maximum wins ties
        let mut best = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = class;
            }
        }
        Ok(best)
    }
}

// ============================================================================
// Linear model
// ============================================================================

/// One weight row per class plus a per-class intercept
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub weights: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearClassifier {
    fn validate(&self) -> Result<(), ModelError> {
        if self.weights.is_empty() {
            return Err(ModelError::Malformed("linear model has no classes".to_string()));
        }
        if self.intercepts.len() != self.weights.len() {
            return Err(ModelError::Malformed(format!(
                "{} weight rows but {} intercepts",
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        let width = self.weights[0].len();
        if self.weights.iter().any(|row| row.len() != width) {
            return Err(ModelError::Malformed("ragged weight matrix".to_string()));
        }
        Ok(())
    }

    /// Raw decision scores, one per class
    pub fn decision_function(&self, features: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_width(self.n_features(), features)?;
        Ok(self
            .weights
            .iter()
            .zip(&self.intercepts)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>() + b)
            .collect())
    }
}

impl Classifier for LinearClassifier {
    fn n_features(&self) -> usize {
        self.weights.first().map(|row| row.len()).unwrap_or(0)
    }

    fn n_classes(&self) -> usize {
        self.weights.len()
    }

    fn predict_index(&self, features: &[f64]) -> Result<usize, ModelError> {
        let scores = self.decision_function(features)?;
        if scores.iter().any(|s| s.is_nan()) {
            return Err(ModelError::Malformed("decision score is NaN".to_string()));
        }

        let mut best = 0;
        for (class, score) in scores.iter().enumerate() {
            if *score > scores[best] {
                best = class;
            }
        }
        Ok(best)
    }
}

fn check_width(expected: usize, features: &[f64]) -> Result<(), ModelError> {
    if features.len() != expected {
        return Err(ModelError::FeatureCount {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}
