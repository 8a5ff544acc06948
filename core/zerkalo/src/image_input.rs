use image::GrayImage;

use crate::error::ZerkaloError;

/// A fully decoded upload, ready for face detection.
///
/// Holding one of these is the proof that decoding already succeeded, so the
/// detector never sees a missing or half-loaded image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    gray: GrayImage,
    original_size: usize,
}

impl DecodedImage {
    /// Decode raw image bytes (JPEG, PNG, or WebP).
    pub fn from_bytes(input: &[u8]) -> Result<Self, ZerkaloError> {
        let image =
            image::load_from_memory(input).map_err(|e| ZerkaloError::DecodeError(e.to_string()))?;
        Self::from_gray(image.to_luma8(), input.len())
    }

    fn from_gray(gray: GrayImage, original_size: usize) -> Result<Self, ZerkaloError> {
        if gray.width() == 0 || gray.height() == 0 {
            return Err(ZerkaloError::ZeroDimensions);
        }
        Ok(Self {
            gray,
            original_size,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.gray.height()
    }

    /// Row-major 8-bit grayscale pixels.
    pub fn gray(&self) -> &[u8] {
        self.gray.as_raw()
    }

    /// Size of the encoded input in bytes.
    pub fn original_size(&self) -> usize {
        self.original_size
    }
}
