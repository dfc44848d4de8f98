//! Layout parameters and jitter sources
//!
//! Jitter only spreads enterprise nodes that would otherwise sit on top of
//! each other. It carries no meaning, so production uses the thread RNG while
//! tests inject a seeded generator or no jitter at all.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RADIUS: f64 = 300.0;
pub const DEFAULT_JITTER: f64 = 50.0;

/// Radial layout parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance of subcategory nodes from the center
    pub radius: f64,
    /// Maximum absolute offset added to each enterprise coordinate
    pub jitter: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            jitter: DEFAULT_JITTER,
        }
    }
}

/// Source of per-axis offsets in `[-amplitude, amplitude]`
pub trait JitterSource {
    fn offset(&mut self, amplitude: f64) -> f64;
}

/// Always zero
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn offset(&mut self, _amplitude: f64) -> f64 {
        0.0
    }
}

/// Uniform jitter drawn from any `rand` generator
#[derive(Debug, Clone)]
pub struct RngJitter<R> {
    rng: R,
}

impl<R: Rng> RngJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngJitter<StdRng> {
    /// Reproducible jitter
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Non-reproducible jitter seeded from the OS
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> JitterSource for RngJitter<R> {
    fn offset(&mut self, amplitude: f64) -> f64 {
        if !amplitude.is_finite() || amplitude <= 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-amplitude..=amplitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_stay_in_range() {
        let mut jitter = RngJitter::seeded(7);
        for _ in 0..1000 {
            let v = jitter.offset(50.0);
            assert!((-50.0..=50.0).contains(&v));
        }
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let mut a = RngJitter::seeded(42);
        let mut b = RngJitter::seeded(42);
        let xs: Vec<f64> = (0..10).map(|_| a.offset(50.0)).collect();
        let ys: Vec<f64> = (0..10).map(|_| b.offset(50.0)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_zero_amplitude_is_zero() {
        let mut jitter = RngJitter::seeded(1);
        assert_eq!(jitter.offset(0.0), 0.0);
        assert_eq!(jitter.offset(-5.0), 0.0);
        assert_eq!(NoJitter.offset(50.0), 0.0);
    }

    #[test]
    fn test_default_layout() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.radius, 300.0);
        assert_eq!(layout.jitter, 50.0);
    }
}
