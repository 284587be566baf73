//! Price Entry Module
//!
//! A cached gold price together with the moment it was fetched.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

// == Price Entry ==
/// The last gold price successfully fetched from the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    /// USD per gram
    pub price_per_gram: f64,
    /// When the oracle answered
    pub fetched_at: DateTime<Utc>,
}

impl PriceEntry {
    pub fn new(price_per_gram: f64, fetched_at: DateTime<Utc>) -> Self {
        Self {
            price_per_gram,
            fetched_at,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry may still be served without refetching.
    ///
    /// Boundary condition: an entry is stale once exactly `window` has
    /// elapsed, so `now - fetched_at == window` is not fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now.signed_duration_since(self.fetched_at) < window
    }

    /// Age of the entry at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now.signed_duration_since(self.fetched_at)
    }
}
