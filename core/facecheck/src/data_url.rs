use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::FaceCheckError;

const DATA_SCHEME: &str = "data:";
const IMAGE_MIME_PREFIX: &str = "image/";
const BASE64_MARKER: &str = "base64";

/// A parsed `data:image/...;base64,...` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Declared MIME type, e.g. `image/jpeg`.
    pub mime_type: &'a str,
    /// Decoded payload bytes.
    pub bytes: Vec<u8>,
}

/// Parse an image data URL and decode its base64 payload.
///
/// Returns [`FaceCheckError::InvalidFormat`] when the string is empty or is not
/// an `image/*` data URL at all, and [`FaceCheckError::Decode`] when the header
/// is fine but the payload cannot be recovered.
pub fn parse_data_url(input: &str) -> Result<DataUrl<'_>, FaceCheckError> {
    if input.is_empty() || !starts_with_ignore_case(input, DATA_SCHEME) {
        return Err(FaceCheckError::InvalidFormat);
    }

    let rest = &input[DATA_SCHEME.len()..];
    let (header, payload) = rest.split_once(',').ok_or(FaceCheckError::InvalidFormat)?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default().trim();
    if !starts_with_ignore_case(mime_type, IMAGE_MIME_PREFIX)
        || mime_type.len() == IMAGE_MIME_PREFIX.len()
    {
        return Err(FaceCheckError::InvalidFormat);
    }

    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case(BASE64_MARKER));
    if !is_base64 {
        return Err(FaceCheckError::Decode(
            "only base64-encoded data URLs are supported".to_string(),
        ));
    }

    // Line-wrapped payloads show up when URLs are pasted from logs or e-mails.
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    if compact.is_empty() {
        return Err(FaceCheckError::Decode("empty image payload".to_string()));
    }

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FaceCheckError::Decode(format!("base64 decode failed: {e}")))?;

    Ok(DataUrl { mime_type, bytes })
}

/// Build a base64 data URL from raw bytes.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

fn starts_with_ignore_case(haystack: &str, prefix: &str) -> bool {
    haystack
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
