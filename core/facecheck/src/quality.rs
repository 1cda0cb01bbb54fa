//! Whole-frame exposure, contrast and sharpness estimates.
//!
//! All three metrics are computed on a strided subset of pixels:
//!
//! - **brightness**: mean of the per-pixel RGB average, `0..=255`.
//! - **contrast**: distance between the darkest and brightest histogram bins
//!   that each hold at least `histogram_trim` of the samples, `0..=255`.
//!   Trimming keeps a few specular highlights or dead pixels from inflating it.
//! - **blur**: inverted mean central-difference gradient magnitude, `0..=1`,
//!   where `1.0` means no edges at all.

use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Tuning for [`analyze_quality`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityConfig {
    /// Use every n-th pixel (raster order) for brightness and contrast.
    pub sample_stride: u32,
    /// Step along each axis for the gradient estimate.
    pub blur_stride: u32,
    /// Minimum share of samples a histogram bin needs to bound the contrast span.
    pub histogram_trim: f64,
    /// Mean gradient magnitude at which an image counts as fully sharp.
    pub edge_scale: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            sample_stride: 5,
            blur_stride: 5,
            histogram_trim: 0.01,
            edge_scale: 20.0,
        }
    }
}

/// Exposure and sharpness measurements for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Mean luminance, 0-255.
    pub brightness: f64,
    /// Spread between the 1st and 99th luminance percentiles.
    pub contrast: f64,
    /// 0 is sharp, 1 has no detectable edges.
    pub blur: f64,
}

/// Compute brightness, contrast and blur for the whole frame.
pub fn analyze_quality(pixels: &RgbaImage, config: &QualityConfig) -> QualityMetrics {
    let (brightness, contrast) =
        brightness_and_contrast(pixels, config.sample_stride, config.histogram_trim);
    let blur = blur_score(pixels, config.blur_stride, config.edge_scale);

    QualityMetrics {
        brightness,
        contrast,
        blur,
    }
}

/// Mean brightness and histogram-trimmed contrast.
pub fn brightness_and_contrast(pixels: &RgbaImage, stride: u32, trim: f64) -> (f64, f64) {
    let mut histogram = [0u32; 256];
    let mut sum = 0.0;
    let mut count = 0u32;

    for px in pixels
        .as_raw()
        .chunks_exact(4)
        .step_by(stride.max(1) as usize)
    {
        let value = channel_mean(px);
        sum += value;
        histogram[value as usize] += 1;
        count += 1;
    }

    if count == 0 {
        return (0.0, 0.0);
    }

    let threshold = count as f64 * trim;
    let low = histogram.iter().position(|&n| n as f64 >= threshold);
    let high = histogram.iter().rposition(|&n| n as f64 >= threshold);

    let contrast = match (low, high) {
        (Some(low), Some(high)) => high.saturating_sub(low) as f64,
        // Samples spread so thin that no bin reaches the trim level.
        _ => 0.0,
    };

    (sum / count as f64, contrast)
}

/// Blur score in `[0, 1]`; higher is blurrier.
pub fn blur_score(pixels: &RgbaImage, stride: u32, edge_scale: f64) -> f64 {
    let (width, height) = pixels.dimensions();
    if width < 3 || height < 3 {
        return 1.0;
    }

    let stride = stride.max(1) as usize;
    let mut total = 0.0;
    let mut count = 0u32;

    for y in (1..height - 1).step_by(stride) {
        for x in (1..width - 1).step_by(stride) {
            let gx = channel_mean(&pixels.get_pixel(x + 1, y).0)
                - channel_mean(&pixels.get_pixel(x - 1, y).0);
            let gy = channel_mean(&pixels.get_pixel(x, y + 1).0)
                - channel_mean(&pixels.get_pixel(x, y - 1).0);
            total += (gx * gx + gy * gy).sqrt();
            count += 1;
        }
    }

    if count == 0 || edge_scale <= 0.0 {
        return 1.0;
    }

    let edge_strength = total / count as f64;
    1.0 - (edge_strength / edge_scale).clamp(0.0, 1.0)
}

fn channel_mean(px: &[u8]) -> f64 {
    (px[0] as u32 + px[1] as u32 + px[2] as u32) as f64 / 3.0
}
