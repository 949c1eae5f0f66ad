//! Statistical summaries of HSV pixel sets
//!
//! - Mean color of a region (used by the color-rule classifier)
//! - Per-channel normalized histograms (used by the feature extractor)

use crate::color::HsvPixel;
use crate::constants::hsv::{HUE_RANGE, SAT_VAL_RANGE};

/// HSV channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvChannel {
    Hue,
    Saturation,
    Value,
}

impl HsvChannel {
    /// Exclusive upper bound of the channel
    pub fn range(self) -> f32 {
        match self {
            HsvChannel::Hue => HUE_RANGE,
            HsvChannel::Saturation | HsvChannel::Value => SAT_VAL_RANGE,
        }
    }

    fn sample(self, pixel: &HsvPixel) -> f32 {
        match self {
            HsvChannel::Hue => pixel.h,
            HsvChannel::Saturation => pixel.s,
            HsvChannel::Value => pixel.v,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColorAnalyzer;

impl ColorAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Arithmetic mean of each channel, `None` for an empty set
    ///
    /// Hue is averaged linearly, not on the circle: a red region mixing hues
    /// near 2 and 178 averages to about 90. Reds whose hues straddle the wrap
    /// point therefore fall outside both red hue bands of the color rules.
    pub fn mean_hsv(&self, pixels: &[HsvPixel]) -> Option<HsvPixel> {
        if pixels.is_empty() {
            return None;
        }
        let n = pixels.len() as f64;
        let (h, s, v) = pixels.iter().fold((0.0f64, 0.0f64, 0.0f64), |acc, p| {
            (acc.0 + p.h as f64, acc.1 + p.s as f64, acc.2 + p.v as f64)
        });
        Some(HsvPixel::new((h / n) as f32, (s / n) as f32, (v / n) as f32))
    }

    /// Histogram of one channel over `[0, channel.range())` with `bins` equal
    /// bins, normalized to sum to 1. An empty pixel set gives all zeros.
    pub fn channel_histogram(&self, pixels: &[HsvPixel], channel: HsvChannel, bins: usize) -> Vec<f32> {
        let values: Vec<f32> = pixels.iter().map(|p| channel.sample(p)).collect();
        normalized_histogram(&values, bins, channel.range())
    }
}

/// Equal-width histogram of `values` over `[0, range)`, L1-normalized.
///
/// Values at or beyond `range` land in the last bin, negative values in the
/// first.
pub fn normalized_histogram(values: &[f32], bins: usize, range: f32) -> Vec<f32> {
    let mut hist = vec![0.0f32; bins];
    if bins == 0 || values.is_empty() {
        return hist;
    }

    for &value in values {
        let idx = ((value / range) * bins as f32).floor();
        let idx = (idx.max(0.0) as usize).min(bins - 1);
        hist[idx] += 1.0;
    }

    let total = values.len() as f32;
    for bin in hist.iter_mut() {
        *bin /= total;
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_hue_is_linear_across_wrap() {
        let pixels = [HsvPixel::new(2.0, 200.0, 200.0), HsvPixel::new(178.0, 200.0, 200.0)];
        let mean = ColorAnalyzer::new().mean_hsv(&pixels).unwrap();
        assert!((mean.h - 90.0).abs() < 1e-4);
        assert!((mean.s - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_mean_hsv_empty() {
        assert!(ColorAnalyzer::new().mean_hsv(&[]).is_none());
    }

    #[test]
    fn test_mean_hsv() {
        let pixels = vec![
            HsvPixel::new(10.0, 100.0, 200.0),
            HsvPixel::new(20.0, 200.0, 100.0),
        ];
        let mean = ColorAnalyzer::new().mean_hsv(&pixels).unwrap();
        assert!((mean.h - 15.0).abs() < 1e-4);
        assert!((mean.s - 150.0).abs() < 1e-4);
        assert!((mean.v - 150.0).abs() < 1e-4);
    }

    #[test]
    fn test_histogram_sums_to_one() {
        let values = vec![0.0, 10.0, 50.0, 120.0, 179.9];
        let hist = normalized_histogram(&values, 8, 180.0);
        assert_eq!(hist.len(), 8);
        let sum: f32 = hist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_histogram_bin_placement() {
        let hist = normalized_histogram(&[0.0, 63.9, 64.0, 255.0], 4, 256.0);
        assert_eq!(hist, vec![0.5, 0.25, 0.0, 0.25]);
    }

    #[test]
    fn test_histogram_clamps_out_of_range() {
        let hist = normalized_histogram(&[-5.0, 300.0], 2, 256.0);
        assert_eq!(hist, vec![0.5, 0.5]);
    }

    #[test]
    fn test_channel_histogram_empty_is_zero() {
        let hist = ColorAnalyzer::new().channel_histogram(&[], HsvChannel::Hue, 8);
        assert_eq!(hist, vec![0.0; 8]);
    }
}
