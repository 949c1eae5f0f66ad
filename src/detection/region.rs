//! Food region detection by HSV thresholding
//!
//! Implements region detection that:
//! - Converts the image to HSV
//! - Masks pixels inside a configured "food-like" HSV box
//! - Extracts external boundaries of the mask
//! - Reports bounding rectangles within the configured area range

use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, BorderType, Contour};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{ColorConverter, HsvPixel};
use crate::config::RegionDetectionConfig;

/// Axis-aligned rectangle around one candidate food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Area in pixels
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Same origin, width and height multiplied by `factor` (at least 1 px)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |v: u32| ((v as f64 * factor).round() as u32).max(1);
        Self::new(self.x, self.y, scale(self.width), scale(self.height))
    }

    /// Copy of the image pixels under this region, clipped to the image
    pub fn crop(&self, image: &RgbImage) -> RgbImage {
        image::imageops::crop_imm(image, self.x, self.y, self.width, self.height).to_image()
    }
}

/// Region detector implementing HSV mask segmentation
#[derive(Debug, Clone)]
pub struct RegionDetector {
    converter: ColorConverter,
    hsv_min: HsvPixel,
    hsv_max: HsvPixel,
    min_area_ratio: f64,
    max_area_ratio: f64,
}

impl Default for RegionDetector {
    fn default() -> Self {
        Self::from_config(&RegionDetectionConfig::default())
    }
}

impl RegionDetector {
    pub fn from_config(config: &RegionDetectionConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            hsv_min: config.hsv_min,
            hsv_max: config.hsv_max,
            min_area_ratio: config.min_area_ratio,
            max_area_ratio: config.max_area_ratio,
        }
    }

    /// Detect candidate food regions
    ///
    /// Returns regions in contour traversal order. An image with no food-like
    /// pixels, or a uniform image, yields no regions.
    pub fn detect(&self, image: &RgbImage) -> Vec<Region> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 || is_uniform(image) {
            return Vec::new();
        }

        // One pixel of background on every side keeps blobs touching the
        // image edge reported as outer borders
        let mut padded = GrayImage::new(width + 2, height + 2);
        image::imageops::replace(&mut padded, &self.food_mask(image), 1, 1);
        let contours = find_contours::<i32>(&padded);

        let image_area = width as f64 * height as f64;
        let min_area = image_area * self.min_area_ratio;
        let max_area = image_area * self.max_area_ratio;

        let regions: Vec<Region> = contours
            .iter()
            .filter(|c| c.parent.is_none() && c.border_type == BorderType::Outer)
            .filter_map(|c| bounding_rect(c, 1))
            .filter(|r| {
                let area = r.area() as f64;
                area >= min_area && area <= max_area
            })
            .collect();

        debug!(
            contours = contours.len(),
            regions = regions.len(),
            "region detection complete"
        );
        regions
    }

    /// Binary mask, 255 where the pixel's HSV lies inside the configured box
    pub fn food_mask(&self, image: &RgbImage) -> GrayImage {
        let mut mask = GrayImage::new(image.width(), image.height());
        for (x, y, pixel) in image.enumerate_pixels() {
            let hsv = self.converter.rgb_to_hsv(pixel[0], pixel[1], pixel[2]);
            if hsv.within(&self.hsv_min, &self.hsv_max) {
                mask.put_pixel(x, y, Luma([255]));
            }
        }
        mask
    }
}

fn is_uniform(image: &RgbImage) -> bool {
    let mut pixels = image.pixels();
    match pixels.next() {
        Some(first) => pixels.all(|p| p == first),
        None => true,
    }
}

/// Bounding rectangle of a contour traced on a mask padded by `pad` pixels
fn bounding_rect(contour: &Contour<i32>, pad: i32) -> Option<Region> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour.points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Region::new(
        (min_x - pad).max(0) as u32,
        (min_y - pad).max(0) as u32,
        (max_x - min_x + 1) as u32,
        (max_y - min_y + 1) as u32,
    ))
}
