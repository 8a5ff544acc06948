use crate::error::ZerkaloError;

/// Bounding box of a detected face within an image.
///
/// The advisor only looks at how many of these come back; the geometry is
/// kept for callers that want to highlight the face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels).
    pub x: f64,
    /// Y coordinate of the top-left corner (pixels).
    pub y: f64,
    /// Width of the bounding box (pixels).
    pub width: f64,
    /// Height of the bounding box (pixels).
    pub height: f64,
    /// Detection confidence score.
    pub confidence: f64,
}

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom face detector (ONNX, a remote
/// service, a test double) and hand it to [`crate::StyleAdvisor::new`] or
/// return it from a loader passed to [`crate::StyleAdvisor::with_loader`].
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    ///
    /// An empty vector means no face was found. Return
    /// [`ZerkaloError::DetectionFailure`] when inference itself fails.
    fn detect(&self, gray: &[u8], width: u32, height: u32)
        -> Result<Vec<FaceBounds>, ZerkaloError>;
}
