use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::style::{StyleCategory, ToneLabel};

/// Source of the tone and style picks made after a face is found.
///
/// The picks are decorative: nothing about the detected face feeds into them.
/// Swap in a scripted implementation to make an analysis deterministic.
pub trait ProfileDraw: Send {
    /// Pick a tone.
    fn draw_tone(&mut self) -> ToneLabel;
    /// Pick a style category.
    fn draw_style(&mut self) -> StyleCategory;
}

/// Independent, uniform draws from an [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomDraw<R = StdRng> {
    rng: R,
}

impl<R: Rng> RandomDraw<R> {
    /// Draw from the given generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDraw<StdRng> {
    /// Reproducible draws from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Draws seeded from the thread-local generator.
    #[cfg(feature = "thread-rng")]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng + Send> ProfileDraw for RandomDraw<R> {
    fn draw_tone(&mut self) -> ToneLabel {
        ToneLabel::ALL[self.rng.random_range(0..ToneLabel::ALL.len())]
    }

    fn draw_style(&mut self) -> StyleCategory {
        StyleCategory::ALL[self.rng.random_range(0..StyleCategory::ALL.len())]
    }
}
