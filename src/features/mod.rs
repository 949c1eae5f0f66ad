//! Region descriptors
//!
//! A [`FeatureVector`] concatenates, in this order, normalized histograms of
//! hue, saturation, value and LBP texture codes. Its length depends only on
//! the [`FeatureConfig`] bin counts, never on the region size.

pub mod texture;

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::{ColorAnalyzer, ColorConverter, HsvChannel};
use crate::config::FeatureConfig;
use crate::detection::Region;
use crate::{AnalysisError, Result};

pub use texture::LbpEncoder;

/// Fixed-length numeric descriptor of one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Squared Euclidean distance; callers must check lengths first
    pub fn distance_squared(&self, other: &[f32]) -> f32 {
        self.0
            .iter()
            .zip(other)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// Computes color and texture descriptors
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    converter: ColorConverter,
    analyzer: ColorAnalyzer,
    lbp: LbpEncoder,
    bins: FeatureConfig,
}

impl FeatureExtractor {
    /// Build an extractor, rejecting zero bin counts and a zero radius
    pub fn new(config: &FeatureConfig) -> Result<Self> {
        for (name, bins) in [
            ("hue_bins", config.hue_bins),
            ("sat_bins", config.sat_bins),
            ("val_bins", config.val_bins),
            ("texture_bins", config.texture_bins),
        ] {
            if bins == 0 {
                return Err(AnalysisError::invalid_parameter(name, bins));
            }
        }
        if config.lbp_radius == 0 {
            return Err(AnalysisError::invalid_parameter("lbp_radius", 0));
        }

        Ok(Self {
            converter: ColorConverter::new(),
            analyzer: ColorAnalyzer::new(),
            lbp: LbpEncoder::new(config.lbp_radius),
            bins: config.clone(),
        })
    }

    /// Descriptor length `L`
    pub fn feature_len(&self) -> usize {
        self.bins.feature_len()
    }

    /// Describe an already-cropped region
    pub fn extract(&self, crop: &RgbImage) -> FeatureVector {
        let hsv = self.converter.image_to_hsv(crop);
        let gray = self.converter.to_gray(crop);

        let mut values = Vec::with_capacity(self.feature_len());
        let bins = &self.bins;
        values.extend(self.analyzer.channel_histogram(&hsv, HsvChannel::Hue, bins.hue_bins));
        values.extend(self.analyzer.channel_histogram(&hsv, HsvChannel::Saturation, bins.sat_bins));
        values.extend(self.analyzer.channel_histogram(&hsv, HsvChannel::Value, bins.val_bins));
        values.extend(self.lbp.histogram(&gray, bins.texture_bins));

        FeatureVector(values)
    }

    /// Crop `region` out of `image` and describe it
    pub fn extract_region(&self, image: &RgbImage, region: &Region) -> FeatureVector {
        self.extract(&region.crop(image))
    }
}
