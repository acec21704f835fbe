//! Crop Recommender Rust Implementation
//!
//! Recommends a crop, a chemical fertilizer and its organic equivalent from
//! one set of soil and climate measurements.
//!
//! Module layout follows the pipeline:
//! - `observation`: input record, vocabularies and CSV batch loading
//! - `artifacts`: trained models and preprocessing loaded from JSON
//! - `features`: label encoding (crop) and one-hot alignment (fertilizer)
//! - `predict`: crop classifier, fertilizer classifier with heuristic fallback
//! - `organic`: fertilizer → organic conversion table
//! - `crop_profile`: duration, alternatives and calendar for a crop
//! - `pipeline`: `RecommendationEngine`, the end-to-end entry point

pub mod artifacts;
pub mod config;
pub mod crop_profile;
pub mod error;
pub mod features;
pub mod observation;
pub mod organic;
pub mod pipeline;
pub mod predict;

// Re-export commonly used types
pub use artifacts::ModelArtifacts;
pub use config::EngineConfig;
pub use crop_profile::{crop_profile, CropProfile};
pub use error::{RecommendError, Result};
pub use features::{align, encode, EncodedVector};
pub use observation::{load_observations_csv, Observation, Region, SoilType};
pub use organic::{ConversionEntry, ConversionTable};
pub use pipeline::{Recommendation, RecommendationEngine};
pub use predict::{heuristic, predict_crop, predict_fertilizer, FertilizerPrediction, FertilizerSource};
