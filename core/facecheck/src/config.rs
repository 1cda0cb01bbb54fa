use serde::{Deserialize, Serialize};

use crate::error::FaceCheckError;
use crate::quality::QualityConfig;
use crate::region::DEFAULT_REGION_FRACTION;
use crate::skin_texture::DetectorConfig;

/// Thresholds applied by the verdict cascade.
///
/// Deserializes from a camelCase object where every field is optional, so
/// callers only name the thresholds they want to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    /// Minimum width and height in pixels.
    pub min_dimension: u32,
    /// Lowest accepted `width / height`.
    pub min_aspect_ratio: f64,
    /// Highest accepted `width / height`.
    pub max_aspect_ratio: f64,
    /// Largest frame (in pixels) that will be rasterized for analysis.
    pub max_pixels: u64,
    /// Side of the candidate face square relative to the shorter image side.
    pub region_fraction: f64,
    /// Mean brightness below this is too dark.
    pub min_brightness: f64,
    /// Mean brightness above this is overexposed.
    pub max_brightness: f64,
    /// Histogram span below this is too flat.
    pub min_contrast: f64,
    /// Blur scores above this are rejected.
    pub max_blur: f64,
    /// Largest accepted distance of the face center from the image center,
    /// as a fraction of the image size, on either axis.
    pub center_tolerance: f64,
    /// Thresholds for the built-in skin/texture detector.
    pub detector: DetectorConfig,
    /// Sampling parameters for the quality metrics.
    pub quality: QualityConfig,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_dimension: 200,
            min_aspect_ratio: 0.5,
            max_aspect_ratio: 2.0,
            max_pixels: 50_000_000,
            region_fraction: DEFAULT_REGION_FRACTION,
            min_brightness: 40.0,
            max_brightness: 215.0,
            min_contrast: 30.0,
            max_blur: 0.8,
            center_tolerance: 0.2,
            detector: DetectorConfig::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl ValidationConfig {
    /// Reject configurations that would make the cascade meaningless.
    pub fn validate(&self) -> Result<(), FaceCheckError> {
        let invalid = |msg: &str| Err(FaceCheckError::InvalidConfig(msg.to_string()));

        let thresholds = [
            self.min_aspect_ratio,
            self.max_aspect_ratio,
            self.region_fraction,
            self.min_brightness,
            self.max_brightness,
            self.min_contrast,
            self.max_blur,
            self.center_tolerance,
            self.detector.min_skin_ratio,
            self.detector.min_texture,
            self.detector.max_texture,
            self.quality.histogram_trim,
            self.quality.edge_scale,
        ];
        if thresholds.iter().any(|t| !t.is_finite()) {
            return invalid("thresholds must be finite numbers");
        }
        if self.min_dimension == 0 {
            return invalid("minDimension must be > 0");
        }
        if !(self.min_aspect_ratio > 0.0 && self.min_aspect_ratio <= self.max_aspect_ratio) {
            return invalid("aspect ratio range must be positive and ordered");
        }
        if self.max_pixels == 0 {
            return invalid("maxPixels must be > 0");
        }
        if !(self.region_fraction > 0.0 && self.region_fraction <= 1.0) {
            return invalid("regionFraction must be in (0, 1]");
        }
        if self.min_brightness > self.max_brightness {
            return invalid("brightness range must be ordered");
        }
        if !(0.0..=1.0).contains(&self.max_blur) {
            return invalid("maxBlur must be in [0, 1]");
        }
        if self.center_tolerance < 0.0 {
            return invalid("centerTolerance must be >= 0");
        }
        if self.detector.stride == 0
            || self.quality.sample_stride == 0
            || self.quality.blur_stride == 0
        {
            return invalid("sampling strides must be > 0");
        }
        if self.detector.min_texture > self.detector.max_texture {
            return invalid("detector texture range must be ordered");
        }
        if !(0.0..=1.0).contains(&self.quality.histogram_trim) {
            return invalid("histogramTrim must be in [0, 1]");
        }
        if self.quality.edge_scale <= 0.0 {
            return invalid("edgeScale must be > 0");
        }
        Ok(())
    }
}
