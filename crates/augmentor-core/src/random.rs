//! Random draws used by the pipeline.
//!
//! The pipeline never touches a generator directly; it asks a
//! [`RandomSource`] for exactly three kinds of values. Any `rand::Rng`
//! is a source, and tests can script the answers.

use rand::Rng;

/// Source of the random decisions made while augmenting one image.
pub trait RandomSource {
    /// Uniform integer in `0..=max`.
    fn crop_offset(&mut self, max: u32) -> u32;

    /// Uniform angle in degrees in `min..=max`. Callers guarantee `min <= max`.
    fn rotation(&mut self, min: f64, max: f64) -> f64;

    /// True with the given probability. Probabilities at or below 0 never
    /// fire, at or above 1 always fire.
    fn chance(&mut self, probability: f64) -> bool;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn crop_offset(&mut self, max: u32) -> u32 {
        self.gen_range(0..=max)
    }

    fn rotation(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.gen_range(min..=max)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.gen::<f64>() < probability
    }
}
