//! Local binary pattern texture coding
//!
//! Each interior pixel is compared against eight neighbours sampled on a
//! circle of fixed radius; a neighbour at least as bright as the centre sets
//! its bit. Pixels closer than `radius` to any edge are never coded.

use image::GrayImage;

use crate::color::analysis::normalized_histogram;
use crate::constants::features::{LBP_CODES, LBP_NEIGHBORS};

/// LBP encoder with precomputed neighbour offsets
#[derive(Debug, Clone)]
pub struct LbpEncoder {
    radius: u32,
    offsets: [(i64, i64); LBP_NEIGHBORS],
}

impl LbpEncoder {
    pub fn new(radius: u32) -> Self {
        let r = radius as f64;
        let mut offsets = [(0i64, 0i64); LBP_NEIGHBORS];
        for (k, offset) in offsets.iter_mut().enumerate() {
            let angle = 2.0 * std::f64::consts::PI * k as f64 / LBP_NEIGHBORS as f64;
            // Nearest-pixel sampling; image y grows downwards
            *offset = ((r * angle.cos()).round() as i64, (-r * angle.sin()).round() as i64);
        }
        Self { radius, offsets }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Code every interior pixel, row-major. Empty when the image is smaller
    /// than `2 * radius + 1` in either dimension.
    pub fn encode(&self, gray: &GrayImage) -> Vec<u8> {
        let (width, height) = gray.dimensions();
        let r = self.radius;
        if width < 2 * r + 1 || height < 2 * r + 1 {
            return Vec::new();
        }

        let mut codes = Vec::with_capacity(((width - 2 * r) * (height - 2 * r)) as usize);
        for y in r..height - r {
            for x in r..width - r {
                let center = gray.get_pixel(x, y)[0];
                let mut code = 0u8;
                for (bit, (dx, dy)) in self.offsets.iter().enumerate() {
                    // |dx|, |dy| <= radius, so the neighbour is inside the image
                    let nx = (x as i64 + dx) as u32;
                    let ny = (y as i64 + dy) as u32;
                    if gray.get_pixel(nx, ny)[0] >= center {
                        code |= 1 << bit;
                    }
                }
                codes.push(code);
            }
        }
        codes
    }

    /// Normalized histogram of the LBP codes with `bins` equal bins
    pub fn histogram(&self, gray: &GrayImage, bins: usize) -> Vec<f32> {
        let codes: Vec<f32> = self.encode(gray).into_iter().map(f32::from).collect();
        normalized_histogram(&codes, bins, LBP_CODES as f32)
    }
}
