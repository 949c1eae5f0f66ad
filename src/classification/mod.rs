//! Food classification module
//!
//! Two interchangeable classifiers behind [`FoodClassifier`]:
//! - [`TrainedClassifier`]: nearest neighbour over feature vectors
//! - [`ColorRuleClassifier`]: ordered HSV rules over the region's mean color
//!
//! The variant is chosen once when the analyzer is built.

pub mod knn;
pub mod rules;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::constants::classification::UNKNOWN_LABEL;
use crate::features::FeatureVector;
use crate::Result;

pub use knn::{KnnModel, TrainedClassifier, TrainingSample};
pub use rules::{ColorRule, ColorRuleClassifier};

/// Label assigned to one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    /// Vote share for trained models; absent for color rules
    pub confidence: Option<f32>,
}

impl Classification {
    pub fn new(label: impl Into<String>, confidence: Option<f32>) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LABEL, None)
    }

    pub fn is_unknown(&self) -> bool {
        self.label == UNKNOWN_LABEL
    }
}

#[derive(Debug, Clone)]
pub enum FoodClassifier {
    Trained(TrainedClassifier),
    ColorRules(ColorRuleClassifier),
}

impl FoodClassifier {
    /// Classify one region.
    ///
    /// The trained variant reads only `features`; the color-rule variant reads
    /// only `crop`.
    pub fn classify(&self, crop: &RgbImage, features: &FeatureVector) -> Result<Classification> {
        match self {
            FoodClassifier::Trained(classifier) => classifier.classify(features),
            FoodClassifier::ColorRules(classifier) => Ok(classifier.classify(crop)),
        }
    }

    pub fn is_trained(&self) -> bool {
        matches!(self, FoodClassifier::Trained(_))
    }

    /// Descriptor length required by the classifier, if any
    pub fn expected_feature_len(&self) -> Option<usize> {
        match self {
            FoodClassifier::Trained(classifier) => Some(classifier.model().feature_len()),
            FoodClassifier::ColorRules(_) => None,
        }
    }
}

impl Default for FoodClassifier {
    fn default() -> Self {
        FoodClassifier::ColorRules(ColorRuleClassifier::default())
    }
}
