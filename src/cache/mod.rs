//! Cache Module
//!
//! Gold price caching with a fixed validity window and stale-if-error
//! fallback.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::PriceEntry;
pub use stats::PriceCacheStats;
pub use store::{GoldQuote, PriceCache, DEFAULT_FALLBACK_PRICE, DEFAULT_VALIDITY_MINUTES};
