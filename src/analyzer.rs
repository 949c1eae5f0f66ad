//! Meal analysis orchestration
//!
//! [`MealAnalyzer`] owns the read-only state of the pipeline (nutrition table,
//! chosen classifier, stage parameters) and runs detection → features →
//! classification → estimation for each image.

use image::RgbImage;
use std::path::Path;
use tracing::{debug, info, instrument};

use crate::calibration::ReferenceScale;
use crate::classification::{FoodClassifier, KnnModel, TrainedClassifier};
use crate::config::AnalyzerConfig;
use crate::detection::RegionDetector;
use crate::estimation::PortionEstimator;
use crate::features::FeatureExtractor;
use crate::image_loader::{load_image, load_image_from_bytes};
use crate::nutrition::NutritionTable;
use crate::report::MealReport;
use crate::{AnalysisError, Result};

#[derive(Debug, Clone)]
pub struct MealAnalyzer {
    table: NutritionTable,
    detector: RegionDetector,
    extractor: FeatureExtractor,
    classifier: FoodClassifier,
    estimator: PortionEstimator,
}

impl MealAnalyzer {
    /// Build an analyzer from configuration.
    ///
    /// Loads the nutrition overrides and, if `classification.model_path`
    /// names an existing file, the trained model; otherwise color rules are
    /// used.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` for an invalid configuration
    /// - `ModelLoadError` if the model file exists but cannot be parsed
    /// - `FeatureDimensionMismatch` if the model was trained with different
    ///   feature settings
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        config.validate()?;

        let table = NutritionTable::load(config.nutrition.override_path.as_deref());

        let model = match &config.classification.model_path {
            Some(path) => KnnModel::load(path)?,
            None => None,
        };
        let classifier = match model {
            Some(model) => {
                info!(samples = model.sample_count(), k = model.k(), "using trained classifier");
                FoodClassifier::Trained(TrainedClassifier::new(model, &table))
            }
            None => {
                info!("no trained model available, using color rules");
                FoodClassifier::default()
            }
        };

        Self::with_parts(config, table, classifier)
    }

    /// Build an analyzer with an injected table and classifier
    pub fn with_parts(
        config: &AnalyzerConfig,
        table: NutritionTable,
        classifier: FoodClassifier,
    ) -> Result<Self> {
        let extractor = FeatureExtractor::new(&config.features)?;

        if let Some(expected) = classifier.expected_feature_len() {
            if expected != extractor.feature_len() {
                return Err(AnalysisError::FeatureDimensionMismatch {
                    expected,
                    actual: extractor.feature_len(),
                });
            }
        }

        Ok(Self {
            table,
            detector: RegionDetector::from_config(&config.region_detection),
            extractor,
            classifier,
            estimator: PortionEstimator::from_config(&config.estimation),
        })
    }

    pub fn table(&self) -> &NutritionTable {
        &self.table
    }

    pub fn classifier(&self) -> &FoodClassifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    /// Analyze a decoded image
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn analyze(&self, image: &RgbImage, scale: Option<&ReferenceScale>) -> Result<MealReport> {
        let regions = self.detector.detect(image);

        let mut report = MealReport::default();
        for region in &regions {
            let crop = region.crop(image);
            let features = self.extractor.extract(&crop);
            let classification = self.classifier.classify(&crop, &features)?;
            let item = self.estimator.estimate(region, &classification, &self.table, scale);

            debug!(
                label = %item.label,
                x = region.x,
                y = region.y,
                width = region.width,
                height = region.height,
                weight_g = item.estimated_weight_g,
                calories = item.estimated_calories,
                "food item estimated"
            );
            report.add_item(item);
        }

        info!(
            items = report.items.len(),
            calories = report.total_calories,
            "meal analysis complete"
        );
        Ok(report)
    }

    /// Load and analyze an image file
    pub fn analyze_path(&self, path: &Path, scale: Option<&ReferenceScale>) -> Result<MealReport> {
        let image = load_image(path)?;
        self.analyze(&image, scale)
    }

    /// Decode and analyze an encoded image buffer
    pub fn analyze_bytes(&self, bytes: &[u8], scale: Option<&ReferenceScale>) -> Result<MealReport> {
        let image = load_image_from_bytes(bytes)?;
        self.analyze(&image, scale)
    }
}
