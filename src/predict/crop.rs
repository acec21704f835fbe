//! Crop predictor
//!
//! No fallback exists here: if the crop model cannot answer, the request fails.

use crate::artifacts::{Classifier, ModelArtifacts};
use crate::error::{RecommendError, Result};
use crate::features::EncodedVector;

const ARTIFACT: &str = "crop_model";

/// Top-1 crop label for an encoded observation
///
/// `vector` is in canonical feature order; it is permuted into the bundle's
/// `feature_order` before the forward pass.
pub fn predict_crop(vector: &EncodedVector, artifacts: &ModelArtifacts) -> Result<String> {
    let bundle = artifacts.crop.require(ARTIFACT)?;

    let input = vector
        .reorder(&bundle.canonical_positions())
        .filter(|v| v.len() == bundle.feature_order.len())
        .ok_or_else(|| {
            RecommendError::unavailable(
                ARTIFACT,
                format!("encoded vector of width {} does not fit feature order", vector.len()),
            )
        })?;

    let index = bundle
        .model
        .predict_index(input.as_slice())
        .map_err(|e| RecommendError::unavailable(ARTIFACT, e))?;

    bundle
        .classes
        .get(index)
        .cloned()
        .ok_or_else(|| RecommendError::unavailable(ARTIFACT, format!("class index {} has no label", index)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::Bundle;
    use crate::features::encode;
    use crate::features::test_support::artifacts;
    use crate::observation::{Observation, Region, SoilType};

    fn obs(rainfall: f64) -> Observation {
        Observation::new(Region::North, SoilType::Loamy, 100.0, 50.0, 150.0, 6.5, 25.0, 70.0, rainfall)
    }

    #[test]
    fn test_predict_crop_follows_model() {
        let artifacts = artifacts(3);
        let wet = encode(&obs(200.0), &artifacts).unwrap();
        let dry = encode(&obs(20.0), &artifacts).unwrap();
        assert_eq!(predict_crop(&wet, &artifacts).unwrap(), "rice");
        assert_eq!(predict_crop(&dry, &artifacts).unwrap(), "maize");
    }

    #[test]
    fn test_predict_crop_is_deterministic() {
        let artifacts = artifacts(3);
        let first = predict_crop(&encode(&obs(200.0), &artifacts).unwrap(), &artifacts).unwrap();
        for _ in 0..10 {
            let again = predict_crop(&encode(&obs(200.0), &artifacts).unwrap(), &artifacts).unwrap();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_permuted_feature_order() {
        let mut artifacts = artifacts(3);
        if let Bundle::Loaded(crop) = &mut artifacts.crop {
            // Model reads rainfall first now
            crop.feature_order.rotate_right(1);
            crop.model = crate::artifacts::ClassifierModel::Forest(crate::artifacts::RandomForest {
                n_features: 9,
                n_classes: 2,
                trees: vec![crate::features::test_support::stump(0, 0.5, 0, 1)],
            });
        }
        let v = encode(&obs(200.0), &artifacts).unwrap();
        assert_eq!(predict_crop(&v, &artifacts).unwrap(), "rice");
    }

    #[test]
    fn test_missing_crop_model_is_fatal() {
        let mut artifacts = artifacts(3);
        let v = encode(&obs(200.0), &artifacts).unwrap();
        artifacts.crop = Bundle::Unavailable("crop_model.json not found".into());
        assert!(matches!(
            predict_crop(&v, &artifacts),
            Err(RecommendError::ModelUnavailable { ref artifact, .. }) if artifact == "crop_model"
        ));
    }

    #[test]
    fn test_wrong_width_is_unavailable() {
        let artifacts = artifacts(3);
        let short = EncodedVector::new(vec![0.0; 4]);
        assert!(predict_crop(&short, &artifacts).is_err());
    }
}
