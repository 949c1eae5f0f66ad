//! Scale calibration from reference objects
//!
//! When an object of known physical length (a fork, a credit card) has been
//! located in the image and measured in pixels, its length gives a
//! pixels-per-centimetre scale for the whole photograph.

use serde::{Deserialize, Serialize};

use crate::constants::reference_objects::LENGTHS_CM;
use crate::{AnalysisError, Result};

/// Physical length of a known reference object
pub fn reference_length_cm(name: &str) -> Option<f64> {
    LENGTHS_CM
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, cm)| *cm)
}

/// Names of all known reference objects
pub fn reference_object_names() -> impl Iterator<Item = &'static str> {
    LENGTHS_CM.iter().map(|(name, _)| *name)
}

/// Pixels per centimetre in the image plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceScale {
    pixels_per_cm: f64,
}

impl ReferenceScale {
    pub fn new(pixels_per_cm: f64) -> Result<Self> {
        if !(pixels_per_cm > 0.0) || !pixels_per_cm.is_finite() {
            return Err(AnalysisError::invalid_parameter("pixels_per_cm", pixels_per_cm));
        }
        Ok(Self { pixels_per_cm })
    }

    /// Scale from a named reference object spanning `pixel_length` pixels
    pub fn from_object(name: &str, pixel_length: f64) -> Result<Self> {
        let length_cm = reference_length_cm(name)
            .ok_or_else(|| AnalysisError::invalid_parameter("reference_object", name))?;
        if !(pixel_length > 0.0) {
            return Err(AnalysisError::invalid_parameter("reference_pixel_length", pixel_length));
        }
        Self::new(pixel_length / length_cm)
    }

    pub fn pixels_per_cm(&self) -> f64 {
        self.pixels_per_cm
    }

    /// Convert a pixel area to square centimetres
    pub fn area_cm2(&self, pixel_area: f64) -> f64 {
        pixel_area / (self.pixels_per_cm * self.pixels_per_cm)
    }
}
