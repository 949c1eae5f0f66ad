//! Color-rule fallback classifier
//!
//! Used when no trained model is available. The region's mean HSV is tested
//! against an ordered list of HSV boxes; the first matching rule wins. The
//! feature vector is not consulted.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::color::{ColorAnalyzer, ColorConverter, HsvPixel};

/// One declarative rule: `label` applies when the mean color lies inside
/// `[min, max]` on every channel (inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRule {
    pub label: String,
    pub min: HsvPixel,
    pub max: HsvPixel,
}

impl ColorRule {
    pub fn new(label: impl Into<String>, min: HsvPixel, max: HsvPixel) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn matches(&self, color: &HsvPixel) -> bool {
        color.within(&self.min, &self.max)
    }
}

/// Default rule list; order is significant where boxes overlap
pub fn default_rules() -> Vec<ColorRule> {
    let hsv = HsvPixel::new;
    vec![
        ColorRule::new("apple", hsv(0.0, 100.0, 50.0), hsv(10.0, 255.0, 255.0)),
        ColorRule::new("apple", hsv(170.0, 100.0, 50.0), hsv(180.0, 255.0, 255.0)),
        ColorRule::new("orange", hsv(10.0, 150.0, 100.0), hsv(22.0, 255.0, 255.0)),
        ColorRule::new("banana", hsv(20.0, 100.0, 120.0), hsv(35.0, 255.0, 255.0)),
        ColorRule::new("bread", hsv(8.0, 40.0, 80.0), hsv(30.0, 160.0, 230.0)),
        ColorRule::new("broccoli", hsv(35.0, 60.0, 30.0), hsv(85.0, 255.0, 255.0)),
        ColorRule::new("rice", hsv(0.0, 0.0, 180.0), hsv(180.0, 40.0, 255.0)),
    ]
}

#[derive(Debug, Clone)]
pub struct ColorRuleClassifier {
    converter: ColorConverter,
    analyzer: ColorAnalyzer,
    rules: Vec<ColorRule>,
}

impl Default for ColorRuleClassifier {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl ColorRuleClassifier {
    pub fn new(rules: Vec<ColorRule>) -> Self {
        Self {
            converter: ColorConverter::new(),
            analyzer: ColorAnalyzer::new(),
            rules,
        }
    }

    pub fn rules(&self) -> &[ColorRule] {
        &self.rules
    }

    /// Classify a region crop by its mean color
    pub fn classify(&self, crop: &RgbImage) -> Classification {
        let pixels = self.converter.image_to_hsv(crop);
        match self.analyzer.mean_hsv(&pixels) {
            Some(mean) => self.classify_color(&mean),
            None => Classification::unknown(),
        }
    }

    /// First rule whose box contains `color`, else unknown
    pub fn classify_color(&self, color: &HsvPixel) -> Classification {
        self.rules
            .iter()
            .find(|rule| rule.matches(color))
            .map(|rule| Classification::new(rule.label.clone(), None))
            .unwrap_or_else(Classification::unknown)
    }
}
