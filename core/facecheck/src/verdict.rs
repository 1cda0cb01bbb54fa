use serde::{Deserialize, Serialize};

use crate::error::{ErrorCategory, FaceCheckError};
use crate::region::NormalizedBox;

/// User-facing messages, one per verdict code.
pub const MSG_SUCCESS: &str = "Face detected and image quality is good for verification.";
pub const MSG_OFF_CENTER: &str =
    "Face is detected but not centered. Please position your face in the center of the frame.";
pub const MSG_INVALID_FORMAT: &str =
    "Invalid image format. Please upload or capture a valid image.";
pub const MSG_LOW_RESOLUTION: &str =
    "Image resolution too low. Please use an image of at least 200x200 pixels.";
pub const MSG_BAD_ASPECT_RATIO: &str =
    "Image doesn't appear to be a proper portrait. Please use a photo with standard proportions.";
pub const MSG_UNABLE_TO_PROCESS: &str = "Unable to process image. Please try a different photo.";
pub const MSG_NO_FACE: &str =
    "No face detected. Please ensure your face is clearly visible and well lit.";
pub const MSG_TOO_DARK: &str = "Image is too dark. Please take the photo in better lighting.";
pub const MSG_OVEREXPOSED: &str =
    "Image is overexposed. Please reduce lighting or avoid direct light sources.";
pub const MSG_LOW_CONTRAST: &str =
    "Image has poor contrast. Please take the photo against a plain background with even lighting.";
pub const MSG_BLURRY: &str =
    "Image appears blurry. Please hold the camera steady and make sure it is in focus.";
pub const MSG_PROCESSING_FAILED: &str =
    "Error processing image. Please try again with a different photo.";

/// Overall classification of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictStatus {
    /// Image is usable.
    Success,
    /// Image is usable but the user should retake it.
    Warning,
    /// Image was rejected.
    Error,
}

impl VerdictStatus {
    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictStatus::Success => "success",
            VerdictStatus::Warning => "warning",
            VerdictStatus::Error => "error",
        }
    }
}

/// Machine-readable reason for a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictCode {
    Success,
    OffCenter,
    InvalidFormat,
    DecodeFailed,
    LowResolution,
    BadAspectRatio,
    ProcessingFailed,
    NoFace,
    TooDark,
    Overexposed,
    LowContrast,
    Blurry,
}

impl VerdictCode {
    /// snake_case name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictCode::Success => "success",
            VerdictCode::OffCenter => "off_center",
            VerdictCode::InvalidFormat => "invalid_format",
            VerdictCode::DecodeFailed => "decode_failed",
            VerdictCode::LowResolution => "low_resolution",
            VerdictCode::BadAspectRatio => "bad_aspect_ratio",
            VerdictCode::ProcessingFailed => "processing_failed",
            VerdictCode::NoFace => "no_face",
            VerdictCode::TooDark => "too_dark",
            VerdictCode::Overexposed => "overexposed",
            VerdictCode::LowContrast => "low_contrast",
            VerdictCode::Blurry => "blurry",
        }
    }
}

/// The single result handed back for every submitted image.
///
/// `status` and `valid` always agree: errors are invalid, success and the
/// off-center warning are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    /// Whether the image can be submitted.
    pub valid: bool,
    /// Success, warning or error.
    pub status: VerdictStatus,
    /// Machine-readable reason.
    pub code: VerdictCode,
    /// Text to show the user.
    pub message: String,
    /// Face area, when one was found before the cascade stopped.
    pub face_box: Option<NormalizedBox>,
}

impl ValidationVerdict {
    /// A passing verdict.
    pub fn success(face_box: Option<NormalizedBox>) -> Self {
        Self {
            valid: true,
            status: VerdictStatus::Success,
            code: VerdictCode::Success,
            message: MSG_SUCCESS.to_string(),
            face_box,
        }
    }

    /// Valid but flagged: the caller decides whether to ask for a retake.
    pub fn off_center(face_box: NormalizedBox) -> Self {
        Self {
            valid: true,
            status: VerdictStatus::Warning,
            code: VerdictCode::OffCenter,
            message: MSG_OFF_CENTER.to_string(),
            face_box: Some(face_box),
        }
    }

    /// Generic failure used for decode errors and anything unexpected.
    pub fn processing_failure() -> Self {
        Self::error(VerdictCode::ProcessingFailed, MSG_PROCESSING_FAILED, None)
    }

    /// Map a pipeline error to its verdict.
    ///
    /// `face_box` is only kept for failures raised after face detection ran,
    /// so callers can still draw guidance over the face.
    pub fn from_error(err: &FaceCheckError, face_box: Option<NormalizedBox>) -> Self {
        let face_box = match err.category() {
            ErrorCategory::NoFace
            | ErrorCategory::Lighting
            | ErrorCategory::Contrast
            | ErrorCategory::Blur => face_box,
            _ => None,
        };

        let (code, message) = match err {
            FaceCheckError::InvalidFormat => (VerdictCode::InvalidFormat, MSG_INVALID_FORMAT),
            FaceCheckError::Decode(_) => (VerdictCode::DecodeFailed, MSG_PROCESSING_FAILED),
            FaceCheckError::LowResolution { .. } => {
                (VerdictCode::LowResolution, MSG_LOW_RESOLUTION)
            }
            FaceCheckError::BadAspectRatio { .. } => {
                (VerdictCode::BadAspectRatio, MSG_BAD_ASPECT_RATIO)
            }
            FaceCheckError::Processing(_) => (VerdictCode::ProcessingFailed, MSG_UNABLE_TO_PROCESS),
            FaceCheckError::InvalidConfig(_) => {
                (VerdictCode::ProcessingFailed, MSG_PROCESSING_FAILED)
            }
            FaceCheckError::NoFace => (VerdictCode::NoFace, MSG_NO_FACE),
            FaceCheckError::TooDark { .. } => (VerdictCode::TooDark, MSG_TOO_DARK),
            FaceCheckError::Overexposed { .. } => (VerdictCode::Overexposed, MSG_OVEREXPOSED),
            FaceCheckError::LowContrast { .. } => (VerdictCode::LowContrast, MSG_LOW_CONTRAST),
            FaceCheckError::Blurry { .. } => (VerdictCode::Blurry, MSG_BLURRY),
        };

        Self::error(code, message, face_box)
    }

    fn error(code: VerdictCode, message: &str, face_box: Option<NormalizedBox>) -> Self {
        Self {
            valid: false,
            status: VerdictStatus::Error,
            code,
            message: message.to_string(),
            face_box,
        }
    }
}

/// Turn the pipeline outcome into a verdict, applying the off-center rule to
/// images that passed every check.
pub(crate) fn compose(
    outcome: Result<Option<NormalizedBox>, FaceCheckError>,
    detected_box: Option<NormalizedBox>,
    center_tolerance: f64,
) -> ValidationVerdict {
    match outcome {
        Ok(Some(face_box)) if face_box.center_offset() > center_tolerance => {
            ValidationVerdict::off_center(face_box)
        }
        Ok(face_box) => ValidationVerdict::success(face_box),
        Err(err) => ValidationVerdict::from_error(&err, detected_box),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered_box() -> NormalizedBox {
        NormalizedBox {
            x: 0.3,
            y: 0.3,
            width: 0.4,
            height: 0.4,
        }
    }

    fn box_centered_at(cx: f64, cy: f64) -> NormalizedBox {
        NormalizedBox {
            x: cx - 0.1,
            y: cy - 0.1,
            width: 0.2,
            height: 0.2,
        }
    }

    fn all_errors() -> Vec<FaceCheckError> {
        vec![
            FaceCheckError::InvalidFormat,
            FaceCheckError::Decode("bad".into()),
            FaceCheckError::LowResolution {
                width: 10,
                height: 10,
                min: 200,
            },
            FaceCheckError::BadAspectRatio { ratio: 3.0 },
            FaceCheckError::Processing("surface".into()),
            FaceCheckError::NoFace,
            FaceCheckError::TooDark { brightness: 10.0 },
            FaceCheckError::Overexposed { brightness: 240.0 },
            FaceCheckError::LowContrast { contrast: 5.0 },
            FaceCheckError::Blurry { blur: 0.95 },
            FaceCheckError::InvalidConfig("x".into()),
        ]
    }

    #[test]
    fn every_error_is_invalid() {
        for err in all_errors() {
            let verdict = ValidationVerdict::from_error(&err, Some(centered_box()));
            assert!(!verdict.valid, "{err}");
            assert_eq!(verdict.status, VerdictStatus::Error);
        }
    }

    #[test]
    fn face_box_only_kept_after_detection() {
        let kept = [
            FaceCheckError::TooDark { brightness: 10.0 },
            FaceCheckError::LowContrast { contrast: 5.0 },
            FaceCheckError::Blurry { blur: 0.95 },
        ];
        for err in kept {
            let verdict = ValidationVerdict::from_error(&err, Some(centered_box()));
            assert_eq!(verdict.face_box, Some(centered_box()), "{err}");
        }

        let dropped = [
            FaceCheckError::InvalidFormat,
            FaceCheckError::LowResolution {
                width: 10,
                height: 10,
                min: 200,
            },
            FaceCheckError::BadAspectRatio { ratio: 3.0 },
            FaceCheckError::Processing("surface".into()),
        ];
        for err in dropped {
            let verdict = ValidationVerdict::from_error(&err, Some(centered_box()));
            assert!(verdict.face_box.is_none(), "{err}");
        }
    }

    #[test]
    fn lighting_errors_have_distinct_messages() {
        let dark =
            ValidationVerdict::from_error(&FaceCheckError::TooDark { brightness: 1.0 }, None);
        let bright =
            ValidationVerdict::from_error(&FaceCheckError::Overexposed { brightness: 250.0 }, None);
        assert!(dark.message.starts_with("Image is too dark"));
        assert!(bright.message.starts_with("Image is overexposed"));
        assert_ne!(dark.code, bright.code);
    }

    #[test]
    fn decode_failure_uses_generic_message() {
        let verdict = ValidationVerdict::from_error(&FaceCheckError::Decode("eof".into()), None);
        assert_eq!(verdict.message, MSG_PROCESSING_FAILED);
        assert_eq!(verdict.code, VerdictCode::DecodeFailed);
    }

    #[test]
    fn off_center_threshold_is_strict() {
        let outside = compose(Ok(Some(box_centered_at(0.71, 0.5))), None, 0.2);
        assert_eq!(outside.status, VerdictStatus::Warning);
        assert!(outside.valid);
        assert_eq!(outside.code, VerdictCode::OffCenter);

        let inside = compose(Ok(Some(box_centered_at(0.69, 0.5))), None, 0.2);
        assert_eq!(inside.status, VerdictStatus::Success);
        assert!(inside.valid);
    }

    #[test]
    fn off_center_checks_vertical_axis() {
        let verdict = compose(Ok(Some(box_centered_at(0.5, 0.25))), None, 0.2);
        assert_eq!(verdict.code, VerdictCode::OffCenter);
    }

    #[test]
    fn success_without_box_is_allowed() {
        let verdict = compose(Ok(None), None, 0.2);
        assert_eq!(verdict.status, VerdictStatus::Success);
        assert_eq!(verdict.message, MSG_SUCCESS);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let verdict = ValidationVerdict::success(Some(centered_box()));
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["code"], "success");
        assert_eq!(json["valid"], true);
        assert!((json["faceBox"]["width"].as_f64().unwrap() - 0.4).abs() < 1e-9);

        let error = ValidationVerdict::from_error(&FaceCheckError::NoFace, None);
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "no_face");
        assert!(json["faceBox"].is_null());
    }

    #[test]
    fn code_strings_match_serde() {
        for code in [
            VerdictCode::OffCenter,
            VerdictCode::BadAspectRatio,
            VerdictCode::ProcessingFailed,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }
}
