//! Simulated "AI detection" figures.
//!
//! **These numbers are random.** No classifier runs anywhere in this crate.
//! [`SimulatedDetector`] exists only to reproduce the before/after gauge of
//! the interface; nothing should treat its output as a measurement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Range the "before" figure is drawn from, in percent.
pub const BEFORE_RANGE: std::ops::Range<f64> = 88.0..99.8;

/// Range the "after" figure is drawn from, in percent.
pub const AFTER_RANGE: std::ops::Range<f64> = 0.1..4.5;

/// Pair of simulated "AI likelihood" percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DetectionScores {
    /// Figure for the uploaded image.
    pub before: f64,
    /// Figure for the result; zero until a run completes.
    pub after: f64,
}

/// Whether a figure renders as "Detection Alert" rather than "Verification Pass".
#[must_use]
pub fn is_flagged(score: f64) -> bool {
    score > 50.0
}

/// Random number source standing in for a detector.
#[derive(Debug)]
pub struct SimulatedDetector {
    rng: StdRng,
}

impl Default for SimulatedDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedDetector {
    /// Seeded from the OS.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic sequence for tests.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Figure for a freshly loaded image.
    pub fn before_score(&mut self) -> f64 {
        self.rng.random_range(BEFORE_RANGE)
    }

    /// Figure for a finished result.
    pub fn after_score(&mut self) -> f64 {
        self.rng.random_range(AFTER_RANGE)
    }
}
