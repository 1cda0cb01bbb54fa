use image::{DynamicImage, RgbaImage};
use serde::Serialize;

use crate::config::ValidationConfig;
use crate::error::FaceCheckError;
use crate::face_detector::{FaceDetection, FaceDetector};
use crate::quality::{analyze_quality, QualityMetrics};
use crate::region::{candidate_region, NormalizedBox};

/// Intermediate results gathered while the cascade runs. Stages that were
/// never reached stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTrace {
    /// Decoded `(width, height)`.
    pub dimensions: Option<(u32, u32)>,
    /// Result of the face-plausibility stage.
    pub detection: Option<FaceDetection>,
    /// Brightness, contrast and blur of the whole frame.
    pub metrics: Option<QualityMetrics>,
}

impl StageTrace {
    pub(crate) fn face_box(&self) -> Option<NormalizedBox> {
        self.detection.as_ref().and_then(|d| d.face_box)
    }
}

/// Decode raw image bytes (JPEG, PNG, WebP, BMP, GIF).
pub(crate) fn decode_image(input: &[u8]) -> Result<DynamicImage, FaceCheckError> {
    let image =
        image::load_from_memory(input).map_err(|e| FaceCheckError::Decode(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(FaceCheckError::Decode("image dimensions are zero".to_string()));
    }
    Ok(image)
}

/// Rasterize the decoded image into a flat RGBA8 buffer at native resolution.
///
/// Fully transparent pixels read back as `(0, 0, 0, 0)`, the way a browser
/// canvas reports them, whatever color the file stores underneath.
pub(crate) fn sample_pixels(
    image: &DynamicImage,
    max_pixels: u64,
) -> Result<RgbaImage, FaceCheckError> {
    let pixels = image.width() as u64 * image.height() as u64;
    if pixels > max_pixels {
        return Err(FaceCheckError::Processing(format!(
            "{}x{} exceeds the {max_pixels}-pixel analysis limit",
            image.width(),
            image.height()
        )));
    }
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        if pixel.0[3] == 0 {
            pixel.0 = [0, 0, 0, 0];
        }
    }
    Ok(rgba)
}

/// Reject frames too small or too oddly shaped to be a portrait.
pub(crate) fn check_geometry(
    width: u32,
    height: u32,
    config: &ValidationConfig,
) -> Result<(), FaceCheckError> {
    if width < config.min_dimension || height < config.min_dimension {
        return Err(FaceCheckError::LowResolution {
            width,
            height,
            min: config.min_dimension,
        });
    }

    let ratio = width as f64 / height as f64;
    if ratio < config.min_aspect_ratio || ratio > config.max_aspect_ratio {
        return Err(FaceCheckError::BadAspectRatio { ratio });
    }
    Ok(())
}

/// Exposure, contrast and blur checks, in that order.
pub(crate) fn check_quality(
    metrics: &QualityMetrics,
    config: &ValidationConfig,
) -> Result<(), FaceCheckError> {
    if metrics.brightness < config.min_brightness {
        return Err(FaceCheckError::TooDark {
            brightness: metrics.brightness,
        });
    }
    if metrics.brightness > config.max_brightness {
        return Err(FaceCheckError::Overexposed {
            brightness: metrics.brightness,
        });
    }
    if metrics.contrast < config.min_contrast {
        return Err(FaceCheckError::LowContrast {
            contrast: metrics.contrast,
        });
    }
    if metrics.blur > config.max_blur {
        return Err(FaceCheckError::Blurry { blur: metrics.blur });
    }
    Ok(())
}

/// Full cascade over raw image bytes: decode → geometry → sample → detect →
/// quality. Returns the face box of an accepted image.
///
/// Face detection and quality analysis both run before either verdict is
/// checked, so the trace carries both sets of numbers; the error order is
/// still no-face before lighting, contrast and blur.
pub(crate) fn run_pipeline(
    input: &[u8],
    config: &ValidationConfig,
    detector: &dyn FaceDetector,
    trace: &mut StageTrace,
) -> Result<Option<NormalizedBox>, FaceCheckError> {
    let decoded = decode_image(input)?;
    let (width, height) = (decoded.width(), decoded.height());
    trace.dimensions = Some((width, height));
    tracing::debug!(width, height, "decoded image");

    check_geometry(width, height, config)?;

    let pixels = sample_pixels(&decoded, config.max_pixels)?;
    drop(decoded);

    let region = candidate_region(width, height, config.region_fraction);
    let detection = detector.detect(&pixels, region);
    tracing::debug!(
        detected = detection.face_detected,
        confidence = detection.confidence,
        "face detection"
    );
    trace.detection = Some(detection.clone());

    let metrics = analyze_quality(&pixels, &config.quality);
    tracing::debug!(
        brightness = metrics.brightness,
        contrast = metrics.contrast,
        blur = metrics.blur,
        "quality metrics"
    );
    trace.metrics = Some(metrics);

    if !detection.face_detected {
        return Err(FaceCheckError::NoFace);
    }
    check_quality(&metrics, config)?;

    Ok(detection.face_box)
}
