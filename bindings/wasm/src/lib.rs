use facecheck::{FaceValidator, NormalizedBox, ValidationConfig, ValidationVerdict};
use wasm_bindgen::prelude::*;

/// Create a JS `Error` with a `code` property.
fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    JsValue::from(err)
}

/// Parse the optional options object into a checked configuration.
///
/// All fields are optional and camelCase, e.g. `{ minDimension: 320,
/// centerTolerance: 0.15, detector: { stride: 2 } }`.
fn parse_options(options: JsValue) -> Result<ValidationConfig, JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        ValidationConfig::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| make_error("INVALID_OPTIONS", &format!("invalid options: {e}")))?
    };
    config
        .validate()
        .map_err(|e| make_error("INVALID_OPTIONS", &e.to_string()))?;
    Ok(config)
}

fn build_box_object(face_box: &NormalizedBox) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"x".into(), &JsValue::from(face_box.x))?;
    js_sys::Reflect::set(&obj, &"y".into(), &JsValue::from(face_box.y))?;
    js_sys::Reflect::set(&obj, &"width".into(), &JsValue::from(face_box.width))?;
    js_sys::Reflect::set(&obj, &"height".into(), &JsValue::from(face_box.height))?;
    Ok(JsValue::from(obj))
}

/// Build a plain JS object from a `ValidationVerdict`.
fn build_verdict_object(verdict: &ValidationVerdict) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"valid".into(), &JsValue::from(verdict.valid))?;
    js_sys::Reflect::set(
        &obj,
        &"status".into(),
        &JsValue::from_str(verdict.status.as_str()),
    )?;
    js_sys::Reflect::set(
        &obj,
        &"code".into(),
        &JsValue::from_str(verdict.code.as_str()),
    )?;
    js_sys::Reflect::set(
        &obj,
        &"message".into(),
        &JsValue::from_str(&verdict.message),
    )?;

    let fb = match verdict.face_box.as_ref() {
        Some(face_box) => build_box_object(face_box)?,
        None => JsValue::NULL,
    };
    js_sys::Reflect::set(&obj, &"faceBox".into(), &fb)?;

    Ok(JsValue::from(obj))
}

/// Check a captured or uploaded photo before facial verification.
///
/// Resolves with `{ valid, status, code, message, faceBox }`. Image problems
/// never reject the promise; only malformed `options` do.
///
/// @param dataUrl - `data:image/...;base64,...` string from a canvas or file reader
/// @param options - Optional threshold overrides (camelCase)
#[wasm_bindgen(js_name = "validateFaceInImage")]
pub async fn validate_face_in_image(
    data_url: String,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    validate_face_in_image_sync(&data_url, options)
}

/// Synchronous form of `validateFaceInImage`.
#[wasm_bindgen(js_name = "validateFaceInImageSync")]
pub fn validate_face_in_image_sync(data_url: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_options(options)?;
    let verdict = FaceValidator::new().config(config).validate(data_url);
    build_verdict_object(&verdict)
}

/// Full analysis (verdict, dimensions, detection, metrics) for debugging
/// overlays, as a plain JS object.
#[wasm_bindgen(js_name = "analyzeFaceImage")]
pub fn analyze_face_image(data_url: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_options(options)?;
    let analysis = FaceValidator::new().config(config).analyze(data_url);
    serde_wasm_bindgen::to_value(&analysis)
        .map_err(|e| make_error("SERIALIZE_ERROR", &e.to_string()))
}
