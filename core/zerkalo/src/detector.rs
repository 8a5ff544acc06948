use std::sync::OnceLock;

use crate::error::ZerkaloError;
use crate::face_detector::{FaceBounds, FaceDetector};
use crate::image_input::DecodedImage;

/// Produces a ready face detector. Called at most once per successful load.
pub type DetectorLoader =
    Box<dyn Fn() -> Result<Box<dyn FaceDetector>, ZerkaloError> + Send + Sync>;

/// Lazily loads a [`FaceDetector`] and runs it on decoded images.
///
/// Loading is idempotent: the first successful load is cached and reused by
/// every later call. A failed load is not cached, so the next call retries.
pub struct DetectorAdapter {
    loader: DetectorLoader,
    backend: OnceLock<Box<dyn FaceDetector>>,
}

impl DetectorAdapter {
    /// Adapter that loads its backend on first use.
    pub fn new(loader: DetectorLoader) -> Self {
        Self {
            loader,
            backend: OnceLock::new(),
        }
    }

    /// Adapter around an already constructed backend.
    pub fn preloaded(detector: Box<dyn FaceDetector>) -> Self {
        let backend = OnceLock::new();
        let _ = backend.set(detector);
        Self {
            loader: Box::new(|| {
                Err(ZerkaloError::DetectionFailure(
                    "preloaded detector has no loader".to_string(),
                ))
            }),
            backend,
        }
    }

    /// Whether the backend has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.backend.get().is_some()
    }

    /// Load the backend if needed and return it.
    pub fn backend(&self) -> Result<&dyn FaceDetector, ZerkaloError> {
        if let Some(backend) = self.backend.get() {
            return Ok(backend.as_ref());
        }

        let loaded = (self.loader)().map_err(as_detection_failure)?;
        tracing::info!("face detector loaded");
        // A concurrent load may have won the race; its backend is kept.
        Ok(self.backend.get_or_init(|| loaded).as_ref())
    }

    /// Run face detection. An empty vector means no face was found.
    pub fn detect_faces(&self, image: &DecodedImage) -> Result<Vec<FaceBounds>, ZerkaloError> {
        let backend = self.backend()?;
        let faces = backend
            .detect(image.gray(), image.width(), image.height())
            .map_err(as_detection_failure)?;
        tracing::debug!(
            faces = faces.len(),
            width = image.width(),
            height = image.height(),
            "face detection finished"
        );
        Ok(faces)
    }
}

fn as_detection_failure(e: ZerkaloError) -> ZerkaloError {
    match e {
        ZerkaloError::DetectionFailure(_) | ZerkaloError::DetectionTimeout(_) => e,
        other => ZerkaloError::DetectionFailure(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FixedDetector(usize);

    impl FaceDetector for FixedDetector {
        fn detect(
            &self,
            _gray: &[u8],
            _width: u32,
            _height: u32,
        ) -> Result<Vec<FaceBounds>, ZerkaloError> {
            Ok((0..self.0)
                .map(|i| FaceBounds {
                    x: i as f64 * 10.0,
                    y: 0.0,
                    width: 8.0,
                    height: 8.0,
                    confidence: 5.0,
                })
                .collect())
        }
    }

    fn tiny_image() -> DecodedImage {
        use image::codecs::png::PngEncoder;
        use image::ImageEncoder;

        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(&[0u8; 4 * 4], 4, 4, image::ExtendedColorType::L8)
            .unwrap();
        DecodedImage::from_bytes(&buffer).unwrap()
    }

    #[test]
    fn loads_backend_once_across_calls() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let adapter = DetectorAdapter::new(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FixedDetector(1)) as Box<dyn FaceDetector>)
        }));

        assert!(!adapter.is_loaded());
        let image = tiny_image();
        for _ in 0..3 {
            assert_eq!(adapter.detect_faces(&image).unwrap().len(), 1);
        }
        assert!(adapter.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_load_is_retried() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let adapter = DetectorAdapter::new(Box::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(ZerkaloError::InvalidConfig("model missing".to_string()))
            } else {
                Ok(Box::new(FixedDetector(0)) as Box<dyn FaceDetector>)
            }
        }));

        let image = tiny_image();
        let first = adapter.detect_faces(&image);
        assert!(matches!(first, Err(ZerkaloError::DetectionFailure(msg)) if msg.contains("model missing")));
        assert!(adapter.detect_faces(&image).unwrap().is_empty());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn preloaded_backend_is_used_directly() {
        let adapter = DetectorAdapter::preloaded(Box::new(FixedDetector(2)));
        assert!(adapter.is_loaded());
        assert_eq!(adapter.detect_faces(&tiny_image()).unwrap().len(), 2);
    }
}
