use std::path::Path;

use crate::config::DetectorConfig;
use crate::detector::DetectorLoader;
use crate::error::ZerkaloError;
use crate::face_detector::{FaceBounds, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The SeetaFace frontal model (`seeta_fd_frontal_v1.0.bin`) is not bundled;
/// load it from bytes or from a file.
pub struct RustfaceDetector {
    model: rustface::Model,
    config: DetectorConfig,
}

impl RustfaceDetector {
    /// Build a detector from SeetaFace model bytes.
    pub fn from_model_bytes(model: &[u8], config: DetectorConfig) -> Result<Self, ZerkaloError> {
        config.validate()?;
        let model = rustface::read_model(std::io::Cursor::new(model)).map_err(|e| {
            ZerkaloError::DetectionFailure(format!("failed to load SeetaFace model: {e}"))
        })?;
        Ok(Self { model, config })
    }

    /// Build a detector from a SeetaFace model file.
    pub fn from_model_file(
        path: impl AsRef<Path>,
        config: DetectorConfig,
    ) -> Result<Self, ZerkaloError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            ZerkaloError::DetectionFailure(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_model_bytes(&bytes, config)
    }

    /// Loader that parses `model` the first time the advisor needs a detector.
    pub fn loader(model: Vec<u8>, config: DetectorConfig) -> DetectorLoader {
        Box::new(move || {
            let detector = Self::from_model_bytes(&model, config.clone())?;
            Ok(Box::new(detector) as Box<dyn FaceDetector>)
        })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(
        &self,
        gray: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<FaceBounds>, ZerkaloError> {
        if gray.len() != (width as usize) * (height as usize) {
            return Err(ZerkaloError::DetectionFailure(format!(
                "buffer of {} bytes does not match {width}x{height}",
                gray.len()
            )));
        }

        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.config.min_face_size);
        detector.set_score_thresh(self.config.score_threshold);
        detector.set_pyramid_scale_factor(self.config.pyramid_scale_factor);
        detector.set_slide_window_step(
            self.config.slide_window_step,
            self.config.slide_window_step,
        );

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        Ok(faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect())
    }
}
