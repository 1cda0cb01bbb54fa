use thiserror::Error;

/// Reasons the pipeline rejects an image, in the order the checks run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FaceCheckError {
    #[error("input is not an image data URL")]
    InvalidFormat,

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("image is {width}x{height}, minimum is {min}x{min}")]
    LowResolution { width: u32, height: u32, min: u32 },

    #[error("aspect ratio {ratio:.2} is outside the portrait range")]
    BadAspectRatio { ratio: f64 },

    #[error("failed to process image: {0}")]
    Processing(String),

    #[error("no face detected")]
    NoFace,

    #[error("image too dark (brightness {brightness:.1})")]
    TooDark { brightness: f64 },

    #[error("image overexposed (brightness {brightness:.1})")]
    Overexposed { brightness: f64 },

    #[error("contrast {contrast:.1} is too low")]
    LowContrast { contrast: f64 },

    #[error("blur score {blur:.2} is too high")]
    Blurry { blur: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse grouping of [`FaceCheckError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Format,
    Decode,
    Resolution,
    AspectRatio,
    Processing,
    NoFace,
    Lighting,
    Contrast,
    Blur,
}

impl FaceCheckError {
    /// The category this error is reported under. Both exposure failures
    /// share [`ErrorCategory::Lighting`].
    pub fn category(&self) -> ErrorCategory {
        match self {
            FaceCheckError::InvalidFormat => ErrorCategory::Format,
            FaceCheckError::Decode(_) => ErrorCategory::Decode,
            FaceCheckError::LowResolution { .. } => ErrorCategory::Resolution,
            FaceCheckError::BadAspectRatio { .. } => ErrorCategory::AspectRatio,
            FaceCheckError::Processing(_) | FaceCheckError::InvalidConfig(_) => {
                ErrorCategory::Processing
            }
            FaceCheckError::NoFace => ErrorCategory::NoFace,
            FaceCheckError::TooDark { .. } | FaceCheckError::Overexposed { .. } => {
                ErrorCategory::Lighting
            }
            FaceCheckError::LowContrast { .. } => ErrorCategory::Contrast,
            FaceCheckError::Blurry { .. } => ErrorCategory::Blur,
        }
    }
}
