use thiserror::Error;

#[derive(Debug, Error)]
pub enum ZerkaloError {
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("face detection failed: {0}")]
    DetectionFailure(String),

    #[error("face detection did not finish within {0} ms")]
    DetectionTimeout(u64),

    #[error("unknown style category: {0}")]
    UnknownStyleCategory(String),

    #[error("unknown tone label: {0}")]
    UnknownToneLabel(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
