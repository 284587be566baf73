//! Price Cache Statistics Module
//!
//! Counts how gold price lookups were answered.

use serde::Serialize;

// == Price Cache Stats ==
/// Tracks price cache behaviour.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCacheStats {
    /// Lookups answered by a fresh cached price
    pub hits: u64,
    /// Lookups that had to go to the oracle
    pub misses: u64,
    /// Successful oracle fetches
    pub refreshes: u64,
    /// Failed oracle fetches
    pub failures: u64,
    /// Failed refreshes answered with the last good price
    pub stale_served: u64,
    /// Failed refreshes answered with the fallback constant
    pub fallback_served: u64,
}

impl PriceCacheStats {
    // == Constructor ==
    /// Creates a new PriceCacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_refresh(&mut self) {
        self.refreshes += 1;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn record_stale(&mut self) {
        self.stale_served += 1;
    }

    pub fn record_fallback(&mut self) {
        self.fallback_served += 1;
    }
}
