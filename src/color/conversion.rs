//! Color space conversion utilities
//!
//! Provides conversions from 8-bit RGB to:
//! - HSV in the 8-bit convention (H [0,180), S and V [0,255])
//! - Grayscale intensity for texture analysis

use image::{GrayImage, RgbImage};
use palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};

use crate::constants::hsv::{HUE_RANGE, SAT_VAL_MAX};

/// One HSV sample: hue in [0, 180), saturation and value in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HsvPixel {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl HsvPixel {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Componentwise inclusive range test
    pub fn within(&self, min: &HsvPixel, max: &HsvPixel) -> bool {
        self.h >= min.h
            && self.h <= max.h
            && self.s >= min.s
            && self.s <= max.s
            && self.v >= min.v
            && self.v <= max.v
    }
}

/// Color converter producing the HSV representation used by the pipeline
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to HSV
    ///
    /// Achromatic colors get hue 0.
    pub fn rgb_to_hsv(&self, r: u8, g: u8, b: u8) -> HsvPixel {
        let srgb: Srgb<f32> = Srgb::new(r, g, b).into_format();
        let hsv: Hsv = Hsv::from_color(srgb);

        let hue = (hsv.hue.into_positive_degrees() / 2.0) % HUE_RANGE;
        HsvPixel {
            h: hue,
            s: (hsv.saturation * SAT_VAL_MAX).clamp(0.0, SAT_VAL_MAX),
            v: (hsv.value * SAT_VAL_MAX).clamp(0.0, SAT_VAL_MAX),
        }
    }

    /// Convert every pixel of an image to HSV, row-major
    pub fn image_to_hsv(&self, image: &RgbImage) -> Vec<HsvPixel> {
        image
            .pixels()
            .map(|p| self.rgb_to_hsv(p[0], p[1], p[2]))
            .collect()
    }

    /// Luma image used for texture coding
    pub fn to_gray(&self, image: &RgbImage) -> GrayImage {
        image::imageops::grayscale(image)
    }
}
