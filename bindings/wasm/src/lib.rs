use serde::Deserialize;
use wasm_bindgen::prelude::*;

/// Options for the advisor, passed as a JavaScript object.
///
/// All fields are optional; missing fields keep the detector defaults.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisorOptions {
    pub min_face_size: Option<u32>,
    pub score_threshold: Option<f64>,
    pub pyramid_scale_factor: Option<f32>,
    pub slide_window_step: Option<u32>,
    pub seed: Option<u64>,
}

/// Create a JS `Error` with a `code` property.
fn make_error(code: &str, message: &str) -> JsValue {
    let err = js_sys::Error::new(message);
    let _ = js_sys::Reflect::set(&err, &"code".into(), &JsValue::from_str(code));
    JsValue::from(err)
}

/// Convert a `ZerkaloError` into a JS `Error` with a machine-readable `code` property.
fn to_js_error(e: zerkalo::ZerkaloError) -> JsValue {
    let code = match &e {
        zerkalo::ZerkaloError::DecodeError(_) => "DECODE_ERROR",
        zerkalo::ZerkaloError::ZeroDimensions => "ZERO_DIMENSIONS",
        zerkalo::ZerkaloError::DetectionFailure(_) => "DETECTION_FAILURE",
        zerkalo::ZerkaloError::DetectionTimeout(_) => "DETECTION_TIMEOUT",
        zerkalo::ZerkaloError::UnknownStyleCategory(_) => "UNKNOWN_STYLE_CATEGORY",
        zerkalo::ZerkaloError::UnknownToneLabel(_) => "UNKNOWN_TONE_LABEL",
        zerkalo::ZerkaloError::InvalidConfig(_) => "INVALID_CONFIG",
    };
    make_error(code, &e.to_string())
}

fn parse_options(options: JsValue) -> Result<AdvisorOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(AdvisorOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| make_error("INVALID_CONFIG", &format!("invalid options: {e}")))
    }
}

/// Apply parsed `AdvisorOptions` on top of the default configuration.
///
/// Without an explicit seed the draws are seeded from `Math.random()`.
fn apply_options(opts: &AdvisorOptions) -> zerkalo::AdvisorConfig {
    let mut config = zerkalo::AdvisorConfig::default();
    if let Some(size) = opts.min_face_size {
        config.detector.min_face_size = size;
    }
    if let Some(threshold) = opts.score_threshold {
        config.detector.score_threshold = threshold;
    }
    if let Some(factor) = opts.pyramid_scale_factor {
        config.detector.pyramid_scale_factor = factor;
    }
    if let Some(step) = opts.slide_window_step {
        config.detector.slide_window_step = step;
    }
    config.seed = Some(
        opts.seed
            .unwrap_or_else(|| (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64),
    );
    config
}

fn profile_to_js(profile: &zerkalo::StyleProfile) -> Result<JsValue, JsValue> {
    let obj = serde_wasm_bindgen::to_value(profile)
        .map_err(|e| make_error("SERIALIZATION_ERROR", &e.to_string()))?;
    js_sys::Reflect::set(
        &obj,
        &"toneCaption".into(),
        &JsValue::from_str(&profile.tone_caption()),
    )?;
    Ok(obj)
}

/// Build a plain JS object from an `AnalysisOutcome`.
fn build_outcome_object(outcome: &zerkalo::AnalysisOutcome) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    match outcome {
        zerkalo::AnalysisOutcome::Profile(profile) => {
            js_sys::Reflect::set(&obj, &"kind".into(), &JsValue::from_str("profile"))?;
            js_sys::Reflect::set(&obj, &"profile".into(), &profile_to_js(profile)?)?;
        }
        zerkalo::AnalysisOutcome::NoFaceFound => {
            js_sys::Reflect::set(&obj, &"kind".into(), &JsValue::from_str("noFace"))?;
        }
        zerkalo::AnalysisOutcome::AnalysisError { .. } => {
            js_sys::Reflect::set(&obj, &"kind".into(), &JsValue::from_str("error"))?;
        }
    }
    if let Some(message) = outcome.message() {
        js_sys::Reflect::set(&obj, &"message".into(), &JsValue::from_str(message))?;
    }
    Ok(JsValue::from(obj))
}

/// Face detection plus style suggestion, kept alive across analyses so the
/// SeetaFace model is parsed only once.
#[wasm_bindgen]
pub struct StyleAdvisor {
    inner: zerkalo::StyleAdvisor,
}

#[wasm_bindgen]
impl StyleAdvisor {
    /// @param model - SeetaFace frontal model bytes (seeta_fd_frontal_v1.0.bin)
    /// @param options - Optional object with fields: minFaceSize,
    ///   scoreThreshold, pyramidScaleFactor, slideWindowStep, seed
    #[wasm_bindgen(constructor)]
    pub fn new(model: Vec<u8>, options: JsValue) -> Result<StyleAdvisor, JsValue> {
        let opts = parse_options(options)?;
        let config = apply_options(&opts);
        let inner = zerkalo::StyleAdvisor::rustface(model, config).map_err(to_js_error)?;
        Ok(StyleAdvisor { inner })
    }

    /// Analyze a photo.
    ///
    /// Resolves to `{ kind: "profile", profile }`, `{ kind: "noFace", message }`
    /// or `{ kind: "error", message }`. Detection failures never throw.
    ///
    /// @param input - Raw image bytes (JPEG, PNG, or WebP)
    pub fn analyze(&mut self, input: Vec<u8>) -> Result<JsValue, JsValue> {
        let outcome = self.inner.analyze_bytes(&input);
        build_outcome_object(&outcome)
    }

    /// Whether the face detection model has been loaded.
    #[wasm_bindgen(getter, js_name = "detectorLoaded")]
    pub fn detector_loaded(&self) -> bool {
        self.inner.is_detector_loaded()
    }
}

/// Look up the profile for a tone and style key.
///
/// @param tone - "light", "medium" or "dark"
/// @param style - "casual", "minimal", "street" or "classic"
#[wasm_bindgen(js_name = "resolveProfile")]
pub fn resolve_profile(tone: &str, style: &str) -> Result<JsValue, JsValue> {
    let profile = zerkalo::resolve_profile_by_key(tone, style).map_err(to_js_error)?;
    profile_to_js(&profile)
}
