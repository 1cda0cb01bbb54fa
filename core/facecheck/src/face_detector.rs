use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::region::{NormalizedBox, PixelRegion};

/// Outcome of running a [`FaceDetector`] over the candidate region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaceDetection {
    /// Whether the region plausibly contains a face.
    pub face_detected: bool,
    /// Detection confidence on a 0–100 scale.
    pub confidence: f64,
    /// Normalized face area. Present exactly when `face_detected` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub face_box: Option<NormalizedBox>,
}

impl FaceDetection {
    /// A positive detection covering `face_box`.
    pub fn found(confidence: f64, face_box: NormalizedBox) -> Self {
        Self {
            face_detected: true,
            confidence,
            face_box: Some(face_box),
        }
    }

    /// A negative detection. The confidence is kept for diagnostics.
    pub fn none(confidence: f64) -> Self {
        Self {
            face_detected: false,
            confidence,
            face_box: None,
        }
    }
}

/// Pluggable face detection backend.
///
/// The built-in implementation is [`crate::SkinTextureDetector`]. Implement this
/// trait to plug in a different engine and pass it to
/// [`crate::FaceValidator::face_detector`].
pub trait FaceDetector: Send + Sync {
    /// Decide whether `candidate` (pixel coordinates inside `pixels`) holds a face.
    fn detect(&self, pixels: &RgbaImage, candidate: PixelRegion) -> FaceDetection;
}
