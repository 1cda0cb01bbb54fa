uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FaceCheckError {
    #[error("invalid options: {message}")]
    InvalidOptions { message: String },
}

impl From<facecheck::FaceCheckError> for FaceCheckError {
    fn from(e: facecheck::FaceCheckError) -> Self {
        FaceCheckError::InvalidOptions {
            message: e.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum VerdictStatus {
    Success,
    Warning,
    Error,
}

impl From<facecheck::VerdictStatus> for VerdictStatus {
    fn from(status: facecheck::VerdictStatus) -> Self {
        match status {
            facecheck::VerdictStatus::Success => VerdictStatus::Success,
            facecheck::VerdictStatus::Warning => VerdictStatus::Warning,
            facecheck::VerdictStatus::Error => VerdictStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
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

impl From<facecheck::VerdictCode> for VerdictCode {
    fn from(code: facecheck::VerdictCode) -> Self {
        match code {
            facecheck::VerdictCode::Success => VerdictCode::Success,
            facecheck::VerdictCode::OffCenter => VerdictCode::OffCenter,
            facecheck::VerdictCode::InvalidFormat => VerdictCode::InvalidFormat,
            facecheck::VerdictCode::DecodeFailed => VerdictCode::DecodeFailed,
            facecheck::VerdictCode::LowResolution => VerdictCode::LowResolution,
            facecheck::VerdictCode::BadAspectRatio => VerdictCode::BadAspectRatio,
            facecheck::VerdictCode::ProcessingFailed => VerdictCode::ProcessingFailed,
            facecheck::VerdictCode::NoFace => VerdictCode::NoFace,
            facecheck::VerdictCode::TooDark => VerdictCode::TooDark,
            facecheck::VerdictCode::Overexposed => VerdictCode::Overexposed,
            facecheck::VerdictCode::LowContrast => VerdictCode::LowContrast,
            facecheck::VerdictCode::Blurry => VerdictCode::Blurry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct Verdict {
    pub valid: bool,
    pub status: VerdictStatus,
    pub code: VerdictCode,
    pub message: String,
    pub face_box: Option<FaceBox>,
}

/// Threshold overrides. Start from [`default_options`] and change what you need.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct ValidationOptions {
    pub min_dimension: u32,
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
    pub min_brightness: f64,
    pub max_brightness: f64,
    pub min_contrast: f64,
    pub max_blur: f64,
    pub center_tolerance: f64,
}

impl From<ValidationOptions> for facecheck::ValidationConfig {
    fn from(options: ValidationOptions) -> Self {
        facecheck::ValidationConfig {
            min_dimension: options.min_dimension,
            min_aspect_ratio: options.min_aspect_ratio,
            max_aspect_ratio: options.max_aspect_ratio,
            min_brightness: options.min_brightness,
            max_brightness: options.max_brightness,
            min_contrast: options.min_contrast,
            max_blur: options.max_blur,
            center_tolerance: options.center_tolerance,
            ..facecheck::ValidationConfig::default()
        }
    }
}

fn convert_verdict(verdict: facecheck::ValidationVerdict) -> Verdict {
    Verdict {
        valid: verdict.valid,
        status: verdict.status.into(),
        code: verdict.code.into(),
        message: verdict.message,
        face_box: verdict.face_box.map(|b| FaceBox {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
        }),
    }
}

/// The default thresholds.
#[uniffi::export]
pub fn default_options() -> ValidationOptions {
    let config = facecheck::ValidationConfig::default();
    ValidationOptions {
        min_dimension: config.min_dimension,
        min_aspect_ratio: config.min_aspect_ratio,
        max_aspect_ratio: config.max_aspect_ratio,
        min_brightness: config.min_brightness,
        max_brightness: config.max_brightness,
        min_contrast: config.min_contrast,
        max_blur: config.max_blur,
        center_tolerance: config.center_tolerance,
    }
}

/// Check a `data:image/...;base64,...` string with the default thresholds.
#[uniffi::export]
pub fn validate_face_in_image(data_url: String) -> Verdict {
    convert_verdict(facecheck::validate_face_in_image(&data_url))
}

/// Check raw image bytes (JPEG, PNG, WebP) from the camera or gallery.
#[uniffi::export]
pub fn validate_face_in_image_bytes(input: Vec<u8>) -> Verdict {
    convert_verdict(facecheck::FaceValidator::new().validate_bytes(&input))
}

/// Check raw image bytes with custom thresholds.
#[uniffi::export]
pub fn validate_face_with_options(
    input: Vec<u8>,
    options: ValidationOptions,
) -> Result<Verdict, FaceCheckError> {
    let config: facecheck::ValidationConfig = options.into();
    config.validate()?;
    let verdict = facecheck::FaceValidator::new()
        .config(config)
        .validate_bytes(&input);
    Ok(convert_verdict(verdict))
}
