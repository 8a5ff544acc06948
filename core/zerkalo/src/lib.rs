//! Photo-driven style suggestions: detect a face, then hand out a style profile.
//!
//! The profile is picked at random once a face is found. Nothing about the
//! face feeds into the pick; detection only gates whether a profile is shown.
//!
//! # Example
//!
//! ```no_run
//! use zerkalo::{AnalysisOutcome, FaceBounds, FaceDetector, StyleAdvisor, ZerkaloError};
//!
//! struct MyDetector;
//! impl FaceDetector for MyDetector {
//!     fn detect(&self, _gray: &[u8], _w: u32, _h: u32) -> Result<Vec<FaceBounds>, ZerkaloError> {
//!         Ok(vec![])
//!     }
//! }
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let mut advisor = StyleAdvisor::new(Box::new(MyDetector));
//! match advisor.analyze_bytes(&bytes) {
//!     AnalysisOutcome::Profile(profile) => println!("{}", profile.name),
//!     other => println!("{}", other.message().unwrap_or_default()),
//! }
//! ```
#![warn(missing_docs)]

mod config;
mod detector;
mod draw;
mod error;
/// Face detection traits and data types.
pub mod face_detector;
mod image_input;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;
mod session;
mod style;

#[cfg(feature = "runtime")]
use std::sync::Arc;
use std::time::Duration;

/// Advisor and detector settings.
pub use config::{AdvisorConfig, DetectorConfig};
/// Lazy, idempotent detector loading.
pub use detector::{DetectorAdapter, DetectorLoader};
/// Injectable tone/style draws.
pub use draw::{ProfileDraw, RandomDraw};
/// Error type returned by zerkalo operations.
pub use error::ZerkaloError;
/// Face detection trait and face bounding-box type.
pub use face_detector::{FaceBounds, FaceDetector};
/// Decoded photo handed to the detector.
pub use image_input::DecodedImage;
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model.
pub use rustface_backend::RustfaceDetector;
/// UI state and its reducer.
pub use session::{AnalysisTicket, ImageHandle, Session, SessionEvent, Status};
/// Style table and lookups.
pub use style::{
    resolve_profile, resolve_profile_by_key, RecommendedItem, StyleCategory, StyleProfile,
    ToneLabel,
};

/// Shown when the photo has no detectable face.
pub const NO_FACE_MESSAGE: &str =
    "😅 Лицо не найдено. Попробуйте другое фото с хорошим освещением.";

/// Shown when detection fails.
pub const ANALYSIS_ERROR_MESSAGE: &str = "Произошла ошибка при анализе 😔";

/// Result of one analysis. Exactly one of these is shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Detection ran and found nothing.
    NoFaceFound,
    /// At least one face was found; here is the suggested style.
    Profile(StyleProfile),
    /// Detection could not run or failed midway.
    AnalysisError {
        /// Diagnostic detail. Not meant for display.
        reason: String,
    },
}

impl AnalysisOutcome {
    /// User-facing message for the non-profile outcomes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            AnalysisOutcome::NoFaceFound => Some(NO_FACE_MESSAGE),
            AnalysisOutcome::Profile(_) => None,
            AnalysisOutcome::AnalysisError { .. } => Some(ANALYSIS_ERROR_MESSAGE),
        }
    }

    /// The profile, if one was produced.
    pub fn profile(&self) -> Option<&StyleProfile> {
        match self {
            AnalysisOutcome::Profile(profile) => Some(profile),
            AnalysisOutcome::NoFaceFound | AnalysisOutcome::AnalysisError { .. } => None,
        }
    }
}

/// Runs face detection on a photo and turns the result into an
/// [`AnalysisOutcome`].
///
/// One advisor serves many analyses; the detector is loaded once and reused.
/// Calls take `&mut self`, so analyses through one advisor never overlap.
pub struct StyleAdvisor {
    #[cfg(feature = "runtime")]
    detector: Arc<DetectorAdapter>,
    #[cfg(not(feature = "runtime"))]
    detector: DetectorAdapter,
    draw: Box<dyn ProfileDraw>,
    config: AdvisorConfig,
}

impl StyleAdvisor {
    /// Advisor around an already constructed detector.
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self::from_adapter(DetectorAdapter::preloaded(detector))
    }

    /// Advisor that loads its detector on the first analysis.
    ///
    /// ```
    /// use zerkalo::{StyleAdvisor, ZerkaloError};
    ///
    /// let advisor = StyleAdvisor::with_loader(Box::new(|| {
    ///     Err(ZerkaloError::DetectionFailure("no model shipped".into()))
    /// }));
    /// assert!(!advisor.is_detector_loaded());
    /// ```
    pub fn with_loader(loader: DetectorLoader) -> Self {
        Self::from_adapter(DetectorAdapter::new(loader))
    }

    /// Advisor on the built-in SeetaFace backend, loaded lazily from `model`.
    #[cfg(feature = "rustface")]
    pub fn rustface(model: Vec<u8>, config: AdvisorConfig) -> Result<Self, ZerkaloError> {
        config.validate()?;
        let loader = RustfaceDetector::loader(model, config.detector.clone());
        Ok(Self::with_loader(loader).config(config))
    }

    fn from_adapter(adapter: DetectorAdapter) -> Self {
        Self {
            #[cfg(feature = "runtime")]
            detector: Arc::new(adapter),
            #[cfg(not(feature = "runtime"))]
            detector: adapter,
            draw: default_draw(),
            config: AdvisorConfig::default(),
        }
    }

    /// Apply a configuration.
    ///
    /// The draws are rebuilt to match `config.seed`: seeded when it is set,
    /// the unseeded default otherwise. Call [`StyleAdvisor::draw`] afterwards
    /// to keep a custom source.
    pub fn config(mut self, config: AdvisorConfig) -> Self {
        self.draw = match config.seed {
            Some(seed) => Box::new(RandomDraw::seeded(seed)),
            None => default_draw(),
        };
        self.config = config;
        self
    }

    /// Make the draws reproducible from `seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self.draw = Box::new(RandomDraw::seeded(seed));
        self
    }

    /// Replace the tone/style draws.
    pub fn draw(mut self, draw: Box<dyn ProfileDraw>) -> Self {
        self.draw = draw;
        self
    }

    /// Bound detection time on the async path (default: 10 s).
    ///
    /// Rounded down to whole milliseconds, with a floor of 1 ms.
    pub fn detection_timeout(mut self, timeout: Duration) -> Self {
        let millis: u64 = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self.config.detection_timeout_ms = millis.max(1);
        self
    }

    /// Current configuration.
    pub fn settings(&self) -> &AdvisorConfig {
        &self.config
    }

    /// Whether the detector has been loaded yet.
    pub fn is_detector_loaded(&self) -> bool {
        self.detector.is_loaded()
    }

    /// Analyze a decoded photo.
    ///
    /// Never fails: detection errors come back as
    /// [`AnalysisOutcome::AnalysisError`].
    pub fn analyze(&mut self, image: &DecodedImage) -> AnalysisOutcome {
        let detection = self.detector.detect_faces(image);
        self.conclude(detection)
    }

    /// Decode `input` and analyze it. Undecodable input is an
    /// [`AnalysisOutcome::AnalysisError`].
    pub fn analyze_bytes(&mut self, input: &[u8]) -> AnalysisOutcome {
        match DecodedImage::from_bytes(input) {
            Ok(image) => self.analyze(&image),
            Err(e) => self.conclude(Err(e)),
        }
    }

    /// Analyze on a blocking worker, giving up after the configured timeout.
    ///
    /// A timeout is an [`AnalysisOutcome::AnalysisError`]. The detection call
    /// itself cannot be interrupted and finishes in the background.
    #[cfg(feature = "runtime")]
    pub async fn analyze_with_timeout(&mut self, image: DecodedImage) -> AnalysisOutcome {
        let detector = Arc::clone(&self.detector);
        let timeout_ms = self.config.detection_timeout_ms;
        let task = tokio::task::spawn_blocking(move || detector.detect_faces(&image));

        let detection =
            match tokio::time::timeout(Duration::from_millis(timeout_ms), task).await {
                Ok(Ok(result)) => result,
                Ok(Err(join_error)) => Err(ZerkaloError::DetectionFailure(join_error.to_string())),
                Err(_) => Err(ZerkaloError::DetectionTimeout(timeout_ms)),
            };
        self.conclude(detection)
    }

    fn conclude(&mut self, detection: Result<Vec<FaceBounds>, ZerkaloError>) -> AnalysisOutcome {
        match detection {
            Ok(faces) if faces.is_empty() => AnalysisOutcome::NoFaceFound,
            Ok(faces) => {
                let tone = self.draw.draw_tone();
                let style = self.draw.draw_style();
                tracing::debug!(faces = faces.len(), %tone, %style, "drew style profile");
                AnalysisOutcome::Profile(resolve_profile(tone, style))
            }
            Err(e) => {
                tracing::warn!(error = %e, "photo analysis failed");
                AnalysisOutcome::AnalysisError {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(feature = "thread-rng")]
fn default_draw() -> Box<dyn ProfileDraw> {
    Box::new(RandomDraw::from_entropy())
}

// Without a thread RNG the caller is expected to call `seed` or `draw`.
#[cfg(not(feature = "thread-rng"))]
fn default_draw() -> Box<dyn ProfileDraw> {
    Box::new(RandomDraw::seeded(0))
}
