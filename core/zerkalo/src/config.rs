use serde::Deserialize;

use crate::error::ZerkaloError;

/// Smallest face size the SeetaFace engine accepts.
const MIN_SUPPORTED_FACE_SIZE: u32 = 20;

/// Tuning for the built-in face detector backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    /// Smallest face edge, in pixels, the detector looks for.
    pub min_face_size: u32,
    /// Score a window must exceed to count as a face.
    pub score_threshold: f64,
    /// Scale step between image pyramid levels, in (0, 1).
    pub pyramid_scale_factor: f32,
    /// Horizontal and vertical sliding window step, in pixels.
    pub slide_window_step: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_face_size: MIN_SUPPORTED_FACE_SIZE,
            score_threshold: 2.0,
            pyramid_scale_factor: 0.8,
            slide_window_step: 4,
        }
    }
}

impl DetectorConfig {
    /// Check every field is within the range the detector supports.
    pub fn validate(&self) -> Result<(), ZerkaloError> {
        if self.min_face_size < MIN_SUPPORTED_FACE_SIZE {
            return Err(ZerkaloError::InvalidConfig(format!(
                "minFaceSize must be at least {MIN_SUPPORTED_FACE_SIZE}, got {}",
                self.min_face_size
            )));
        }
        if !self.score_threshold.is_finite() {
            return Err(ZerkaloError::InvalidConfig(
                "scoreThreshold must be finite".to_string(),
            ));
        }
        if !(self.pyramid_scale_factor > 0.0 && self.pyramid_scale_factor < 1.0) {
            return Err(ZerkaloError::InvalidConfig(format!(
                "pyramidScaleFactor must be between 0.0 and 1.0, got {}",
                self.pyramid_scale_factor
            )));
        }
        if self.slide_window_step == 0 {
            return Err(ZerkaloError::InvalidConfig(
                "slideWindowStep must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for a [`crate::StyleAdvisor`].
///
/// Every field has a default, so `{}` is a valid JSON configuration:
///
/// ```
/// use zerkalo::AdvisorConfig;
///
/// let config = AdvisorConfig::from_json_str(r#"{ "seed": 7, "detector": { "minFaceSize": 40 } }"#)
///     .unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.detector.min_face_size, 40);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisorConfig {
    /// Face detector tuning.
    pub detector: DetectorConfig,
    /// Fixed seed for the tone/style draws. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Upper bound for one detection call on the async path.
    pub detection_timeout_ms: u64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            seed: None,
            detection_timeout_ms: 10_000,
        }
    }
}

impl AdvisorConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, ZerkaloError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ZerkaloError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field is usable.
    pub fn validate(&self) -> Result<(), ZerkaloError> {
        self.detector.validate()?;
        if self.detection_timeout_ms == 0 {
            return Err(ZerkaloError::InvalidConfig(
                "detectionTimeoutMs must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
