//! Crop feature encoder
//!
//! Observation → label-encoded categoricals + raw numerics in
//! `FEATURE_ORDER`, then standardized with the shared scaler.

use super::EncodedVector;
use crate::artifacts::ModelArtifacts;
use crate::error::{RecommendError, Result};
use crate::observation::{Observation, CATEGORICAL_FIELDS, FEATURE_ORDER};

/// Encode an observation for the crop model
///
/// # Errors
/// - `UnknownCategory` if region or soil type is absent from its vocabulary
/// - `ModelUnavailable` if the preprocessing artifacts did not load
pub fn encode(observation: &Observation, artifacts: &ModelArtifacts) -> Result<EncodedVector> {
    let preprocessing = artifacts.preprocessing.require("preprocessing")?;
    let scaler = &preprocessing.scaler;

    if scaler.mean.len() != FEATURE_ORDER.len() || scaler.scale.len() != FEATURE_ORDER.len() {
        return Err(RecommendError::unavailable(
            "preprocessing",
            format!("scaler width {} does not match {} features", scaler.mean.len(), FEATURE_ORDER.len()),
        ));
    }

    let mut raw = Vec::with_capacity(FEATURE_ORDER.len());
    for field in CATEGORICAL_FIELDS {
        let value = observation.categorical(field).unwrap_or_default();
        let vocabulary = preprocessing.encoders.get(field).ok_or_else(|| {
            RecommendError::unavailable("preprocessing", format!("no encoder for '{}'", field))
        })?;
        let code = vocabulary.iter().position(|label| label == value).ok_or_else(|| {
            RecommendError::UnknownCategory {
                field: field.to_string(),
                value: value.to_string(),
            }
        })?;
        raw.push(code as f64);
    }
    raw.extend(observation.numeric_values());

    let scaled = raw
        .into_iter()
        .enumerate()
        .map(|(idx, x)| scaler.transform_value(idx, x))
        .collect();

    Ok(EncodedVector::new(scaled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::test_support::artifacts;
    use crate::observation::{Region, SoilType};
    use approx::assert_relative_eq;

    fn north_loamy() -> Observation {
        Observation::new(Region::North, SoilType::Loamy, 100.0, 50.0, 150.0, 6.5, 25.0, 70.0, 200.0)
    }

    #[test]
    fn test_encode_orders_and_scales() {
        let artifacts = artifacts(3);
        let v = encode(&north_loamy(), &artifacts).unwrap();

        assert_eq!(v.len(), FEATURE_ORDER.len());
        // Vocabulary is [Central, East, North, South, West]; North = 2, mean 2, scale 1
        assert_relative_eq!(v.as_slice()[0], 0.0);
        // Loamy = 1 in [Clayey, Loamy, Sandy, Silty], mean 1.5, scale 0.5
        assert_relative_eq!(v.as_slice()[1], -1.0);
        // N: (100 - 50) / 25
        assert_relative_eq!(v.as_slice()[2], 2.0);
        // pH: scale 0 is treated as 1
        assert_relative_eq!(v.as_slice()[5], 0.5);
    }

    #[test]
    fn test_encode_is_bit_identical() {
        let artifacts = artifacts(3);
        let a = encode(&north_loamy(), &artifacts).unwrap();
        let b = encode(&north_loamy(), &artifacts).unwrap();
        let bits_a: Vec<u64> = a.as_slice().iter().map(|x| x.to_bits()).collect();
        let bits_b: Vec<u64> = b.as_slice().iter().map(|x| x.to_bits()).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_unknown_region_is_surfaced() {
        let artifacts = artifacts(3);
        let mut obs = north_loamy();
        obs.region = "Arctic".to_string();
        assert_eq!(
            encode(&obs, &artifacts),
            Err(RecommendError::UnknownCategory { field: "region".into(), value: "Arctic".into() })
        );
    }

    #[test]
    fn test_unknown_soil_is_surfaced() {
        let artifacts = artifacts(3);
        let mut obs = north_loamy();
        obs.soil_type = "Peaty".to_string();
        assert!(matches!(
            encode(&obs, &artifacts),
            Err(RecommendError::UnknownCategory { ref field, .. }) if field == "soil_type"
        ));
    }

    #[test]
    fn test_missing_preprocessing_is_unavailable() {
        let mut artifacts = artifacts(3);
        artifacts.preprocessing = crate::artifacts::Bundle::Unavailable("file missing".into());
        assert!(matches!(
            encode(&north_loamy(), &artifacts),
            Err(RecommendError::ModelUnavailable { ref artifact, .. }) if artifact == "preprocessing"
        ));
    }
}
