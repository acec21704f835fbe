//! Crop and fertilizer prediction
//!
//! Each stage is in its own module:
//! - `crop`: crop classifier wrapper (fatal on failure)
//! - `fertilizer`: fertilizer classifier with degenerate-model fallback
//! - `heuristic`: model-free fertilizer rules

pub mod crop;
pub mod fertilizer;
pub mod heuristic;

pub use crop::predict_crop;
pub use fertilizer::{
    predict_fertilizer, FertilizerPrediction, FertilizerSource, DEFAULT_DEGENERATE_CLASS_THRESHOLD,
};
pub use heuristic::{heuristic, nutrient_target, NutrientTarget, HEURISTIC_LABELS};
