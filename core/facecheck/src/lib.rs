//! Image-quality and face-plausibility checks for identity verification photos.
//!
//! An image submitted as a data URL goes through a fixed cascade: format,
//! resolution, aspect ratio, rasterization, face plausibility, exposure,
//! contrast, blur and finally centering. The first failing check decides the
//! [`ValidationVerdict`]; the call itself never fails.
//!
//! # Example
//!
//! ```no_run
//! use facecheck::{validate_face_in_image, VerdictStatus};
//!
//! let data_url = std::fs::read_to_string("capture.txt").unwrap();
//! let verdict = validate_face_in_image(&data_url);
//! if verdict.status != VerdictStatus::Success {
//!     println!("{}", verdict.message);
//! }
//! ```
#![warn(missing_docs)]

mod config;
mod data_url;
mod error;
/// Face detection trait and data types.
pub mod face_detector;
#[cfg(feature = "async")]
mod nonblocking;
mod pipeline;
/// Whole-frame brightness, contrast and blur metrics.
pub mod quality;
mod region;
mod skin_texture;
mod verdict;

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::Serialize;

/// Thresholds used by the cascade.
pub use config::ValidationConfig;
/// Data URL parsing helpers.
pub use data_url::{parse_data_url, to_data_url, DataUrl};
/// Error type produced by the pipeline stages.
pub use error::{ErrorCategory, FaceCheckError};
/// Face detection trait and result type.
pub use face_detector::{FaceDetection, FaceDetector};
#[cfg(feature = "async")]
/// Tokio wrappers around the blocking pipeline.
pub use nonblocking::{validate_face_in_image_async, validate_with_timeout};
/// Intermediate stage results.
pub use pipeline::StageTrace;
/// Quality metrics and their tuning.
pub use quality::{QualityConfig, QualityMetrics};
/// Region geometry.
pub use region::{candidate_region, NormalizedBox, PixelRegion};
/// Built-in skin-tone/texture heuristic detector.
pub use skin_texture::{DetectorConfig, SkinTextureDetector, SkinTextureScore};
/// Verdict types.
pub use verdict::{ValidationVerdict, VerdictCode, VerdictStatus};

/// Verdict plus every intermediate measurement that was computed before the
/// cascade stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Final verdict.
    pub verdict: ValidationVerdict,
    /// Dimensions, detection result and quality metrics.
    #[serde(flatten)]
    pub trace: StageTrace,
}

/// Builder for validating verification photos.
///
/// Holds the thresholds and the face detector; each call to
/// [`FaceValidator::validate`] is independent and shares no state with other
/// calls, so one validator can serve many threads.
pub struct FaceValidator {
    config: ValidationConfig,
    /// User-provided detector. When `None`, a [`SkinTextureDetector`] built
    /// from `config.detector` is used.
    detector: Option<Box<dyn FaceDetector>>,
}

impl Default for FaceValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceValidator {
    /// Validator with the default thresholds and the built-in detector.
    pub fn new() -> Self {
        Self {
            config: ValidationConfig::default(),
            detector: None,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn current_config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Minimum accepted width and height in pixels (default: 200).
    pub fn min_dimension(mut self, pixels: u32) -> Self {
        self.config.min_dimension = pixels;
        self
    }

    /// Accepted `width / height` range (default: 0.5 to 2.0).
    pub fn aspect_ratio_range(mut self, min: f64, max: f64) -> Self {
        self.config.min_aspect_ratio = min;
        self.config.max_aspect_ratio = max;
        self
    }

    /// Accepted mean brightness range (default: 40 to 215).
    pub fn brightness_range(mut self, min: f64, max: f64) -> Self {
        self.config.min_brightness = min;
        self.config.max_brightness = max;
        self
    }

    /// Minimum histogram contrast span (default: 30).
    pub fn min_contrast(mut self, contrast: f64) -> Self {
        self.config.min_contrast = contrast;
        self
    }

    /// Highest accepted blur score (default: 0.8).
    pub fn max_blur(mut self, blur: f64) -> Self {
        self.config.max_blur = blur;
        self
    }

    /// Largest accepted face-center offset before the off-center warning
    /// (default: 0.2).
    pub fn center_tolerance(mut self, tolerance: f64) -> Self {
        self.config.center_tolerance = tolerance;
        self
    }

    /// Provide a custom face detector implementation.
    ///
    /// ```no_run
    /// use facecheck::{FaceDetection, FaceDetector, FaceValidator, PixelRegion};
    /// use image::RgbaImage;
    ///
    /// struct MyDetector;
    /// impl FaceDetector for MyDetector {
    ///     fn detect(&self, pixels: &RgbaImage, candidate: PixelRegion) -> FaceDetection {
    ///         // Your detection logic here
    ///         FaceDetection::none(0.0)
    ///     }
    /// }
    ///
    /// let verdict = FaceValidator::new()
    ///     .face_detector(Box::new(MyDetector))
    ///     .validate("data:image/png;base64,...");
    /// ```
    pub fn face_detector(mut self, detector: Box<dyn FaceDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Validate an image data URL.
    pub fn validate(&self, data_url: &str) -> ValidationVerdict {
        self.analyze(data_url).verdict
    }

    /// Validate raw image bytes, skipping the data URL step.
    pub fn validate_bytes(&self, bytes: &[u8]) -> ValidationVerdict {
        self.analyze_bytes(bytes).verdict
    }

    /// Validate a data URL and keep the intermediate measurements.
    #[tracing::instrument(level = "debug", skip_all, fields(input_len = data_url.len()))]
    pub fn analyze(&self, data_url: &str) -> Analysis {
        match parse_data_url(data_url) {
            Ok(parsed) => {
                tracing::debug!(
                    mime = parsed.mime_type,
                    bytes = parsed.bytes.len(),
                    "parsed data URL"
                );
                self.analyze_bytes(&parsed.bytes)
            }
            Err(err) => self.finish(Err(err), StageTrace::default()),
        }
    }

    /// Validate raw image bytes and keep the intermediate measurements.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Analysis {
        if let Err(err) = self.config.validate() {
            return self.finish(Err(err), StageTrace::default());
        }

        let builtin;
        let detector: &dyn FaceDetector = match self.detector.as_deref() {
            Some(detector) => detector,
            None => {
                builtin = SkinTextureDetector::new(self.config.detector.clone());
                &builtin
            }
        };

        let mut trace = StageTrace::default();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            pipeline::run_pipeline(bytes, &self.config, detector, &mut trace)
        }));

        match outcome {
            Ok(result) => self.finish(result, trace),
            Err(_) => {
                tracing::error!("face check pipeline panicked");
                Analysis {
                    verdict: ValidationVerdict::processing_failure(),
                    trace,
                }
            }
        }
    }

    fn finish(
        &self,
        result: Result<Option<NormalizedBox>, FaceCheckError>,
        trace: StageTrace,
    ) -> Analysis {
        if let Err(err) = &result {
            tracing::warn!(error = %err, category = ?err.category(), "image rejected");
        }
        let verdict = verdict::compose(result, trace.face_box(), self.config.center_tolerance);
        tracing::debug!(code = verdict.code.as_str(), valid = verdict.valid, "verdict");
        Analysis { verdict, trace }
    }
}

/// Validate an image data URL with the default thresholds and the built-in
/// detector.
pub fn validate_face_in_image(data_url: &str) -> ValidationVerdict {
    FaceValidator::new().validate(data_url)
}
