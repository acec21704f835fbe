//! Recommendation engine - main coordinator
//!
//! Observation → encode → crop → align → fertilizer (model | heuristic)
//! → organic conversion → Recommendation.
//!
//! The engine holds only immutable state, so one instance can serve any
//! number of threads; `recommend_batch` fans out over rayon.

use crate::artifacts::ModelArtifacts;
use crate::config::EngineConfig;
use crate::crop_profile::{crop_profile, CropProfile};
use crate::error::Result;
use crate::features::encode;
use crate::observation::Observation;
use crate::organic::ConversionTable;
use crate::predict::{predict_crop, predict_fertilizer, FertilizerSource};
use rayon::prelude::*;
use serde::Serialize;

/// Final output for one observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub crop: String,
    pub fertilizer: String,
    pub fertilizer_source: FertilizerSource,
    /// Empty when the conversion table has no entry for `fertilizer`
    pub organic_equivalent: String,
    pub notes: String,
    pub preparation_steps: Vec<String>,
    pub crop_profile: CropProfile,
}

impl Recommendation {
    /// True when the fertilizer came from the rules rather than the model
    pub fn is_heuristic(&self) -> bool {
        self.fertilizer_source == FertilizerSource::Heuristic
    }
}

/// Recommendation pipeline over loaded artifacts
pub struct RecommendationEngine {
    artifacts: ModelArtifacts,
    conversions: ConversionTable,
    config: EngineConfig,
}

impl RecommendationEngine {
    pub fn new(artifacts: ModelArtifacts, conversions: ConversionTable, config: EngineConfig) -> Self {
        Self {
            artifacts,
            conversions,
            config,
        }
    }

    /// Load artifacts and the conversion table named by `config`
    ///
    /// Missing model bundles do not fail construction; they surface per
    /// request (crop) or trigger the heuristic (fertilizer). A configured
    /// conversion table that can't be read is an error.
    pub fn from_config(config: EngineConfig) -> anyhow::Result<Self> {
        tracing::info!("Initializing recommendation engine...");

        let artifacts = ModelArtifacts::load(&config.artifact_dir);

        let conversions = match &config.conversion_table {
            Some(path) => ConversionTable::load_csv(path)?,
            None => ConversionTable::embedded(),
        };

        tracing::info!("Recommendation engine initialized:");
        tracing::info!("  Artifacts: {:?}", config.artifact_dir);
        tracing::info!("  Conversion entries: {}", conversions.len());
        tracing::info!("  Degenerate class threshold: {}", config.degenerate_class_threshold);

        Ok(Self::new(artifacts, conversions, config))
    }

    pub fn artifacts(&self) -> &ModelArtifacts {
        &self.artifacts
    }

    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline for one observation
    ///
    /// # Errors
    /// - `InvalidObservation` for out-of-range or non-finite measurements
    /// - `UnknownCategory` for a region/soil type the encoders never saw
    /// - `ModelUnavailable` when preprocessing or the crop model can't be used
    ///
    /// Fertilizer failures never surface; see `fertilizer_source`.
    pub fn recommend(&self, observation: &Observation) -> Result<Recommendation> {
        observation.validate()?;

        let encoded = encode(observation, &self.artifacts)?;
        let crop = predict_crop(&encoded, &self.artifacts)?;

        let (fertilizer, fertilizer_source) = predict_fertilizer(
            observation,
            &crop,
            &self.artifacts,
            self.config.degenerate_class_threshold,
        )
        .into_parts();

        let conversion = self.conversions.convert(&fertilizer);

        tracing::debug!(
            crop = %crop,
            fertilizer = %fertilizer,
            source = ?fertilizer_source,
            "Recommendation complete"
        );

        Ok(Recommendation {
            crop_profile: crop_profile(&crop),
            crop,
            fertilizer,
            fertilizer_source,
            organic_equivalent: conversion.organic_equivalent,
            notes: conversion.notes,
            preparation_steps: conversion.preparation_steps,
        })
    }

    /// Recommend for many observations in parallel; output order matches input
    pub fn recommend_batch(&self, observations: &[Observation]) -> Vec<Result<Recommendation>> {
        observations
            .par_iter()
            .map(|obs| self.recommend(obs))
            .collect()
    }
}
