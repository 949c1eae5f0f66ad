//! Configuration structures for the meal analysis pipeline.
//!
//! This module defines all tunable parameters, organized into one section
//! per pipeline stage.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use meal_scan::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), meal_scan::AnalysisError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`RegionDetectionConfig`]: HSV mask bounds and area filters
//! - [`FeatureConfig`]: histogram bin counts and texture radius
//! - [`ClassificationConfig`]: trained model location and neighbour count
//! - [`EstimationConfig`]: pixel scale, food height, fallback density
//! - [`NutritionConfig`]: optional nutrition override file

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::HsvPixel;
use crate::constants::{classification, detection, estimation, features};
use crate::{AnalysisError, Result};

/// Complete pipeline configuration for meal analysis.
///
/// Every section falls back to its defaults when missing from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub region_detection: RegionDetectionConfig,
    pub features: FeatureConfig,
    pub classification: ClassificationConfig,
    pub estimation: EstimationConfig,
    pub nutrition: NutritionConfig,
}

/// Region detection parameters.
///
/// Pixels whose HSV value lies within `[hsv_min, hsv_max]` (inclusive) are
/// considered food-like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionDetectionConfig {
    /// Lower HSV bound of the food mask
    pub hsv_min: HsvPixel,

    /// Upper HSV bound of the food mask
    pub hsv_max: HsvPixel,

    /// Minimum bounding box area as fraction of image (0.0-1.0)
    pub min_area_ratio: f64,

    /// Maximum bounding box area as fraction of image (0.0-1.0)
    pub max_area_ratio: f64,
}

/// Feature extraction parameters.
///
/// The descriptor length is the sum of the four bin counts; a trained model
/// only works with the configuration it was trained against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    pub hue_bins: usize,
    pub sat_bins: usize,
    pub val_bins: usize,
    pub texture_bins: usize,

    /// Local binary pattern sampling radius in pixels
    pub lbp_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Persisted nearest-neighbour model; color rules are used when absent
    pub model_path: Option<PathBuf>,

    /// Neighbours consulted when training a new model
    pub k: usize,
}

/// Portion estimation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Physical area of one pixel when no reference object is supplied
    pub cm2_per_pixel: f64,

    /// Assumed food height
    pub food_height_cm: f64,

    /// Density for labels with no nutrition entry
    pub default_density_g_per_cm3: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionConfig {
    /// JSON file merged over the built-in nutrition table
    pub override_path: Option<PathBuf>,
}

impl Default for RegionDetectionConfig {
    fn default() -> Self {
        Self {
            hsv_min: HsvPixel::new(detection::HUE_MIN, detection::SAT_MIN, detection::VAL_MIN),
            hsv_max: HsvPixel::new(detection::HUE_MAX, detection::SAT_MAX, detection::VAL_MAX),
            min_area_ratio: detection::MIN_AREA_RATIO,
            max_area_ratio: detection::MAX_AREA_RATIO,
        }
    }
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            hue_bins: features::HUE_BINS,
            sat_bins: features::SAT_BINS,
            val_bins: features::VAL_BINS,
            texture_bins: features::TEXTURE_BINS,
            lbp_radius: features::LBP_RADIUS,
        }
    }
}

impl FeatureConfig {
    /// Length of every descriptor produced under this configuration
    pub fn feature_len(&self) -> usize {
        self.hue_bins + self.sat_bins + self.val_bins + self.texture_bins
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            k: classification::DEFAULT_K,
        }
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            cm2_per_pixel: estimation::CM2_PER_PIXEL,
            food_height_cm: estimation::FOOD_HEIGHT_CM,
            default_density_g_per_cm3: estimation::DEFAULT_DENSITY_G_PER_CM3,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            AnalysisError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            AnalysisError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Reject parameter combinations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let det = &self.region_detection;
        let channels = [
            ("region_detection.hue", det.hsv_min.h, det.hsv_max.h),
            ("region_detection.saturation", det.hsv_min.s, det.hsv_max.s),
            ("region_detection.value", det.hsv_min.v, det.hsv_max.v),
        ];
        for (name, lo, hi) in channels {
            if lo > hi {
                return Err(AnalysisError::invalid_parameter(name, format!("{}..{}", lo, hi)));
            }
        }
        if !(0.0..=1.0).contains(&det.min_area_ratio) || det.min_area_ratio > det.max_area_ratio {
            return Err(AnalysisError::invalid_parameter(
                "region_detection.min_area_ratio",
                det.min_area_ratio,
            ));
        }

        let feat = &self.features;
        for (name, bins) in [
            ("features.hue_bins", feat.hue_bins),
            ("features.sat_bins", feat.sat_bins),
            ("features.val_bins", feat.val_bins),
            ("features.texture_bins", feat.texture_bins),
        ] {
            if bins == 0 {
                return Err(AnalysisError::invalid_parameter(name, bins));
            }
        }
        if feat.lbp_radius == 0 {
            return Err(AnalysisError::invalid_parameter("features.lbp_radius", feat.lbp_radius));
        }

        if self.classification.k == 0 {
            return Err(AnalysisError::invalid_parameter("classification.k", self.classification.k));
        }

        let est = &self.estimation;
        for (name, value) in [
            ("estimation.cm2_per_pixel", est.cm2_per_pixel),
            ("estimation.food_height_cm", est.food_height_cm),
            ("estimation.default_density_g_per_cm3", est.default_density_g_per_cm3),
        ] {
            if !(value > 0.0) {
                return Err(AnalysisError::invalid_parameter(name, value));
            }
        }
        Ok(())
    }
}
