//! Nearest-neighbour food classifier
//!
//! A [`KnnModel`] stores labelled training descriptors. Labels are class
//! indices into the nutrition table key order at training time; the
//! [`TrainedClassifier`] maps them back through a snapshot of that order.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::classification::Classification;
use crate::features::FeatureVector;
use crate::nutrition::NutritionTable;
use crate::{AnalysisError, Result};

/// One labelled training descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: FeatureVector,
    pub class_index: usize,
}

/// Fitted k-nearest-neighbour model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnnModel {
    k: usize,
    feature_len: usize,
    samples: Vec<TrainingSample>,
}

impl KnnModel {
    /// Fit a model. All samples must share one descriptor length.
    pub fn fit(samples: Vec<TrainingSample>, k: usize) -> Result<Self> {
        if k == 0 {
            return Err(AnalysisError::invalid_parameter("k", k));
        }
        let feature_len = samples
            .first()
            .map(|s| s.features.len())
            .ok_or_else(|| AnalysisError::invalid_parameter("samples", "empty"))?;
        if let Some(bad) = samples.iter().find(|s| s.features.len() != feature_len) {
            return Err(AnalysisError::FeatureDimensionMismatch {
                expected: feature_len,
                actual: bad.features.len(),
            });
        }

        Ok(Self {
            k,
            feature_len,
            samples,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Descriptor length the model was trained on
    pub fn feature_len(&self) -> usize {
        self.feature_len
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Predict a class index and the fraction of the k neighbours voting for it.
    ///
    /// Neighbours are ordered by distance, then by sample position; vote ties
    /// go to the lowest class index.
    pub fn predict(&self, features: &FeatureVector) -> Result<(usize, f32)> {
        if features.len() != self.feature_len {
            return Err(AnalysisError::FeatureDimensionMismatch {
                expected: self.feature_len,
                actual: features.len(),
            });
        }

        let mut ranked: Vec<(f32, usize)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, s)| (features.distance_squared(s.features.as_slice()), i))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let k = self.k.min(ranked.len());
        let mut votes: Vec<(usize, usize)> = Vec::new();
        for &(_, i) in &ranked[..k] {
            let class = self.samples[i].class_index;
            match votes.iter_mut().find(|(c, _)| *c == class) {
                Some((_, count)) => *count += 1,
                None => votes.push((class, 1)),
            }
        }

        let (class, count) = votes
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .ok_or_else(|| AnalysisError::processing("model has no samples"))?;
        Ok((class, count as f32 / k as f32))
    }

    /// Load a persisted model. A missing file is `Ok(None)`.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!(path = %path.display(), "no trained model found");
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::model_load(format!("Failed to read {}", path.display()), e)
        })?;
        let model: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::model_load(format!("Failed to parse {}", path.display()), e)
        })?;
        // Deserialization bypasses fit(), so re-check its invariants
        let model = Self::fit(model.samples, model.k).map_err(|e| AnalysisError::ModelLoadError {
            message: format!("Inconsistent model in {}: {}", path.display(), e),
            source: None,
        })?;
        Ok(Some(model))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)
            .map_err(|e| AnalysisError::processing(format!("Failed to serialize model: {}", e)))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::processing(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}

/// Trained classifier variant
#[derive(Debug, Clone)]
pub struct TrainedClassifier {
    model: KnnModel,
    labels: Vec<String>,
}

impl TrainedClassifier {
    /// Bind a model to the key order of `table`
    pub fn new(model: KnnModel, table: &NutritionTable) -> Self {
        Self {
            model,
            labels: table.labels(),
        }
    }

    pub fn model(&self) -> &KnnModel {
        &self.model
    }

    pub fn classify(&self, features: &FeatureVector) -> Result<Classification> {
        let (class, confidence) = self.model.predict(features)?;
        Ok(match self.labels.get(class) {
            Some(label) => Classification::new(label.clone(), Some(confidence)),
            None => Classification::unknown(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::classification::UNKNOWN_LABEL;

    fn sample(values: &[f32], class_index: usize) -> TrainingSample {
        TrainingSample {
            features: FeatureVector::new(values.to_vec()),
            class_index,
        }
    }

    fn two_cluster_model(k: usize) -> KnnModel {
        KnnModel::fit(
            vec![
                sample(&[0.0, 0.0], 0),
                sample(&[0.1, 0.0], 0),
                sample(&[0.0, 0.1], 0),
                sample(&[1.0, 1.0], 1),
                sample(&[0.9, 1.0], 1),
            ],
            k,
        )
        .unwrap()
    }

    #[test]
    fn test_nearest_neighbour() {
        let model = two_cluster_model(1);
        let (class, confidence) = model.predict(&FeatureVector::new(vec![0.95, 0.9])).unwrap();
        assert_eq!(class, 1);
        assert_eq!(confidence, 1.0);
        assert_eq!(model.predict(&FeatureVector::new(vec![0.05, 0.02])).unwrap().0, 0);
    }

    #[test]
    fn test_majority_vote_confidence() {
        let model = two_cluster_model(3);
        let (class, confidence) = model.predict(&FeatureVector::new(vec![0.0, 0.0])).unwrap();
        assert_eq!(class, 0);
        assert!((confidence - 1.0).abs() < 1e-6);

        let model = two_cluster_model(5);
        let (class, confidence) = model.predict(&FeatureVector::new(vec![0.0, 0.0])).unwrap();
        assert_eq!(class, 0);
        assert!((confidence - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_vote_tie_prefers_lower_class() {
        let model = KnnModel::fit(vec![sample(&[1.0], 3), sample(&[-1.0], 2)], 2).unwrap();
        assert_eq!(model.predict(&FeatureVector::new(vec![0.0])).unwrap(), (2, 0.5));
    }

    #[test]
    fn test_deterministic_prediction() {
        let model = two_cluster_model(3);
        let query = FeatureVector::new(vec![0.5, 0.5]);
        let first = model.predict(&query).unwrap();
        for _ in 0..10 {
            assert_eq!(model.predict(&query).unwrap(), first);
        }
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let model = two_cluster_model(1);
        let err = model.predict(&FeatureVector::new(vec![0.0; 3])).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::FeatureDimensionMismatch { expected: 2, actual: 3 }
        ));
    }

    #[test]
    fn test_fit_rejects_mixed_lengths() {
        let result = KnnModel::fit(vec![sample(&[0.0, 0.0], 0), sample(&[0.0], 1)], 1);
        assert!(matches!(result, Err(AnalysisError::FeatureDimensionMismatch { .. })));
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(KnnModel::fit(Vec::new(), 1).is_err());
        assert!(KnnModel::fit(vec![sample(&[0.0], 0)], 0).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        let model = two_cluster_model(3);
        model.save(&path).unwrap();
        assert_eq!(KnnModel::load(&path).unwrap(), Some(model));
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(KnnModel::load(&dir.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn test_load_malformed_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "garbage").unwrap();
        assert!(matches!(
            KnnModel::load(&path),
            Err(AnalysisError::ModelLoadError { .. })
        ));
    }

    #[test]
    fn test_trained_classifier_maps_labels() {
        let table = NutritionTable::builtin();
        let apple = table.index_of("apple").unwrap();
        let rice = table.index_of("rice").unwrap();
        let model = KnnModel::fit(vec![sample(&[0.0], apple), sample(&[1.0], rice)], 1).unwrap();
        let classifier = TrainedClassifier::new(model, &table);

        let result = classifier.classify(&FeatureVector::new(vec![0.9])).unwrap();
        assert_eq!(result.label, "rice");
        assert_eq!(result.confidence, Some(1.0));
    }

    #[test]
    fn test_out_of_range_class_is_unknown() {
        let table = NutritionTable::builtin();
        let model = KnnModel::fit(vec![sample(&[0.0], table.len() + 5)], 1).unwrap();
        let classifier = TrainedClassifier::new(model, &table);
        let result = classifier.classify(&FeatureVector::new(vec![0.0])).unwrap();
        assert_eq!(result.label, UNKNOWN_LABEL);
    }
}
