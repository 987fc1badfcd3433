//! Simulated exchange rates used when the oracle has no price

use crate::shared::constants::{FALLBACK_DEFAULT_RATE_MIN, FALLBACK_DEFAULT_RATE_SPAN};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;

/// Known pairs as (from, to, center rate, spread)
const KNOWN_PAIRS: &[(&str, &str, f64, f64)] = &[
    ("WETH", "USDC", 3000.0, 50.0),
    ("WBTC", "WETH", 15.0, 0.5),
    ("WETH", "UNI", 200.0, 10.0),
    ("USDC", "DAI", 0.99, 0.01),
];

/// Bounded-random rate table.
///
/// A known pair draws from `[center - spread, center + spread)`; the reverse
/// direction uses the reciprocal of a draw from the same entry.
pub struct FallbackRateModel {
    rng: Mutex<Box<dyn RngCore + Send>>,
}

impl FallbackRateModel {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Use a specific random source, e.g. a seeded `StdRng` in tests
    pub fn with_rng(rng: impl RngCore + Send + 'static) -> Self {
        Self {
            rng: Mutex::new(Box::new(rng)),
        }
    }

    pub fn simulate_rate(&self, from_symbol: &str, to_symbol: &str) -> f64 {
        let sample = self.sample();

        match lookup(from_symbol, to_symbol) {
            Some((center, spread, false)) => center + (sample * 2.0 - 1.0) * spread,
            Some((center, spread, true)) => 1.0 / (center + (sample * 2.0 - 1.0) * spread),
            None => FALLBACK_DEFAULT_RATE_MIN + sample * FALLBACK_DEFAULT_RATE_SPAN,
        }
    }

    /// Inclusive lower and exclusive upper bound of rates for a pair
    pub fn rate_bounds(from_symbol: &str, to_symbol: &str) -> (f64, f64) {
        match lookup(from_symbol, to_symbol) {
            Some((center, spread, false)) => (center - spread, center + spread),
            Some((center, spread, true)) => (1.0 / (center + spread), 1.0 / (center - spread)),
            None => (
                FALLBACK_DEFAULT_RATE_MIN,
                FALLBACK_DEFAULT_RATE_MIN + FALLBACK_DEFAULT_RATE_SPAN,
            ),
        }
    }

    fn sample(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen::<f64>()
    }
}

impl Default for FallbackRateModel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FallbackRateModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRateModel").finish_non_exhaustive()
    }
}

/// Returns (center, spread, reversed)
fn lookup(from_symbol: &str, to_symbol: &str) -> Option<(f64, f64, bool)> {
    KNOWN_PAIRS.iter().find_map(|&(from, to, center, spread)| {
        if from == from_symbol && to == to_symbol {
            Some((center, spread, false))
        } else if from == to_symbol && to == from_symbol {
            Some((center, spread, true))
        } else {
            None
        }
    })
}
