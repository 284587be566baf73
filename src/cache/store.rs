//! Price Cache Module
//!
//! Time-bounded cache in front of the gold price oracle. Lookups never fail:
//! a fresh cached price is served as is, a stale or missing one is refetched,
//! and a failed refetch falls back to the last good price or, if there never
//! was one, to a configured constant.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{Clock, PriceCacheStats, PriceEntry, SystemClock};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::pricing::ounce_to_gram;
use crate::upstream::PriceOracle;

/// Default validity window of a fetched price, in minutes
pub const DEFAULT_VALIDITY_MINUTES: i64 = 15;

/// Price per gram served when the oracle has never answered
pub const DEFAULT_FALLBACK_PRICE: f64 = 106.93;

#[derive(Debug, Default)]
struct CacheState {
    entry: Option<PriceEntry>,
    stats: PriceCacheStats,
    /// Upstream fetches finished so far, successful or not
    attempts: u64,
}

/// A served gold price and the cached entry it came from.
///
/// `entry` is None when the fallback constant was served.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoldQuote {
    pub price_per_gram: f64,
    pub entry: Option<PriceEntry>,
}

impl GoldQuote {
    fn cached(entry: PriceEntry) -> Self {
        Self {
            price_per_gram: entry.price_per_gram,
            entry: Some(entry),
        }
    }
}

// == Price Cache ==
/// Gold price cache shared by all requests.
pub struct PriceCache {
    oracle: Arc<dyn PriceOracle>,
    clock: Arc<dyn Clock>,
    validity: Duration,
    fallback_price: f64,
    state: RwLock<CacheState>,
    /// Held while talking to the oracle so concurrent misses share one fetch
    refresh_guard: Mutex<()>,
}

impl PriceCache {
    // == Constructor ==
    /// Creates a cache reading the system clock.
    ///
    /// # Arguments
    /// * `oracle` - Upstream gold price source
    /// * `validity` - How long a fetched price is served without refetching
    /// * `fallback_price` - Price per gram used when nothing was ever fetched
    pub fn new(oracle: Arc<dyn PriceOracle>, validity: Duration, fallback_price: f64) -> Self {
        Self::with_clock(oracle, Arc::new(SystemClock), validity, fallback_price)
    }

    /// Creates a cache with an explicit time source.
    pub fn with_clock(
        oracle: Arc<dyn PriceOracle>,
        clock: Arc<dyn Clock>,
        validity: Duration,
        fallback_price: f64,
    ) -> Self {
        Self {
            oracle,
            clock,
            validity,
            fallback_price,
            state: RwLock::new(CacheState::default()),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Creates a cache from the validity window and fallback in the Config.
    pub fn from_config(oracle: Arc<dyn PriceOracle>, config: &Config) -> Self {
        let validity = i64::try_from(config.cache_valid_minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .unwrap_or_else(|| {
                warn!(
                    "Gold cache window of {} minutes is out of range, using {}",
                    config.cache_valid_minutes, DEFAULT_VALIDITY_MINUTES
                );
                Duration::minutes(DEFAULT_VALIDITY_MINUTES)
            });
        Self::new(oracle, validity, config.fallback_gold_price)
    }

    // == Current Price ==
    /// Returns the gold price per gram to price products with.
    ///
    /// Never fails. See [`PriceCache::quote`].
    pub async fn current_price(&self) -> f64 {
        self.quote().await.price_per_gram
    }

    /// Returns the gold price per gram together with the entry it was read
    /// from, so callers can report both consistently.
    ///
    /// Only one caller at a time talks to the oracle. Callers queued behind
    /// it reuse its outcome: the refreshed entry on success, the stale entry
    /// or the fallback on failure.
    pub async fn quote(&self) -> GoldQuote {
        if let Some(entry) = self.fresh_entry().await {
            return GoldQuote::cached(entry);
        }

        let seen_attempts = self.state.read().await.attempts;
        let _guard = self.refresh_guard.lock().await;

        // Another caller may have refreshed while we waited
        if let Some(entry) = self.fresh_entry().await {
            return GoldQuote::cached(entry);
        }
        if self.state.read().await.attempts != seen_attempts {
            debug!("Gold price fetch failed while waiting, not retrying");
            return self.serve_without_fresh_entry().await;
        }

        self.state.write().await.stats.record_miss();

        match self.fetch_and_store().await {
            Ok(entry) => GoldQuote::cached(entry),
            Err(err) => {
                warn!("Gold price fetch failed: {}", err);
                self.serve_without_fresh_entry().await
            }
        }
    }

    // == Refresh ==
    /// Forces an upstream fetch regardless of freshness.
    ///
    /// On failure the cached entry is left untouched.
    pub async fn refresh(&self) -> Result<f64> {
        let _guard = self.refresh_guard.lock().await;
        self.fetch_and_store().await.map(|entry| entry.price_per_gram)
    }

    /// True when a cached price exists and is no longer fresh `within` from
    /// now. Nothing cached counts as not expiring.
    pub async fn expires_within(&self, within: Duration) -> bool {
        let horizon = self.clock.now().checked_add_signed(within);
        self.state.read().await.entry.is_some_and(|entry| match horizon {
            Some(horizon) => !entry.is_fresh(horizon, self.validity),
            None => true,
        })
    }

    // == Snapshot ==
    /// Returns the last successfully fetched price, fresh or not.
    pub async fn snapshot(&self) -> Option<PriceEntry> {
        self.state.read().await.entry
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> PriceCacheStats {
        self.state.read().await.stats.clone()
    }

    /// Name of the upstream price source.
    pub fn source(&self) -> String {
        self.oracle.source()
    }

    async fn fresh_entry(&self) -> Option<PriceEntry> {
        let now = self.clock.now();
        let mut state = self.state.write().await;
        match state.entry {
            Some(entry) if entry.is_fresh(now, self.validity) => {
                state.stats.record_hit();
                debug!(
                    "Using cached gold price: {:.4} (age {}s)",
                    entry.price_per_gram,
                    entry.age(now).num_seconds()
                );
                Some(entry)
            }
            _ => None,
        }
    }

    async fn fetch_and_store(&self) -> Result<PriceEntry> {
        let fetched = self
            .oracle
            .fetch_ounce_price()
            .await
            .map(ounce_to_gram)
            .and_then(|price| {
                if price.is_finite() && price > 0.0 {
                    Ok(price)
                } else {
                    Err(CatalogError::Upstream(format!(
                        "gold price is not a positive number: {}",
                        price
                    )))
                }
            });

        let mut state = self.state.write().await;
        state.attempts += 1;
        match fetched {
            Ok(price) => {
                let entry = PriceEntry::new(price, self.clock.now());
                state.entry = Some(entry);
                state.stats.record_refresh();
                info!("Gold price refreshed: {:.4} USD/g", price);
                Ok(entry)
            }
            Err(err) => {
                state.stats.record_failure();
                Err(err)
            }
        }
    }

    async fn serve_without_fresh_entry(&self) -> GoldQuote {
        let mut state = self.state.write().await;
        match state.entry {
            Some(entry) => {
                state.stats.record_stale();
                warn!(
                    "Serving stale gold price {:.4} from {}",
                    entry.price_per_gram, entry.fetched_at
                );
                GoldQuote::cached(entry)
            }
            None => {
                state.stats.record_fallback();
                warn!("Using fallback gold price {:.2}", self.fallback_price);
                GoldQuote {
                    price_per_gram: self.fallback_price,
                    entry: None,
                }
            }
        }
    }
}

impl std::fmt::Debug for PriceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceCache")
            .field("source", &self.oracle.source())
            .field("validity", &self.validity)
            .field("fallback_price", &self.fallback_price)
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use crate::pricing::GRAMS_PER_TROY_OUNCE;
    use crate::upstream::testing::ScriptedOracle;

    fn cache_with(oracle: Arc<ScriptedOracle>, clock: Arc<ManualClock>) -> PriceCache {
        PriceCache::with_clock(
            oracle,
            clock,
            Duration::minutes(DEFAULT_VALIDITY_MINUTES),
            DEFAULT_FALLBACK_PRICE,
        )
    }

    #[tokio::test]
    async fn test_cold_cache_fetches_and_converts() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3110.35)]));
        let cache = cache_with(oracle.clone(), Arc::new(ManualClock::default()));

        let price = cache.current_price().await;
        assert!((price - 100.0).abs() < 1e-9);
        assert_eq!(oracle.calls(), 1);
        assert_eq!(cache.snapshot().await.unwrap().price_per_gram, price);
    }

    #[tokio::test]
    async fn test_hit_within_window_skips_oracle() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3000.0), Ok(9000.0)]));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(oracle.clone(), clock.clone());

        let first = cache.current_price().await;
        clock.advance(Duration::minutes(14));
        let second = cache.current_price().await;

        assert_eq!(first, second);
        assert_eq!(oracle.calls(), 1);

        let stats = cache.stats().await;
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.refreshes, 1);
    }

    #[tokio::test]
    async fn test_refetch_after_window() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3000.0), Ok(6000.0)]));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(oracle.clone(), clock.clone());

        let first = cache.current_price().await;
        clock.advance(Duration::minutes(15));
        let second = cache.current_price().await;

        assert_eq!(oracle.calls(), 2);
        assert!((second - 2.0 * first).abs() < 1e-9);
        assert_eq!(cache.snapshot().await.unwrap().fetched_at, clock.now());
    }

    #[tokio::test]
    async fn test_cold_failure_uses_fallback_without_caching_it() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Err(CatalogError::Upstream(
            "down".to_string(),
        ))]));
        let cache = cache_with(oracle.clone(), Arc::new(ManualClock::default()));

        assert_eq!(cache.current_price().await, DEFAULT_FALLBACK_PRICE);
        assert!(cache.snapshot().await.is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.fallback_served, 1);
    }

    #[tokio::test]
    async fn test_failure_after_expiry_serves_stale() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Ok(GRAMS_PER_TROY_OUNCE * 80.0),
            Err(CatalogError::Upstream("timeout".to_string())),
        ]));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(oracle.clone(), clock.clone());

        let fetched_at = clock.now();
        let first = cache.current_price().await;
        clock.advance(Duration::hours(2));
        let second = cache.current_price().await;

        assert_eq!(first, second);
        assert_eq!(oracle.calls(), 2);
        // The stale entry keeps its original timestamp
        assert_eq!(cache.snapshot().await.unwrap().fetched_at, fetched_at);
        assert_eq!(cache.stats().await.stale_served, 1);
    }

    #[tokio::test]
    async fn test_non_positive_quote_is_a_failure() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(0.0), Ok(-5.0)]));
        let cache = cache_with(oracle.clone(), Arc::new(ManualClock::default()));

        assert_eq!(cache.current_price().await, DEFAULT_FALLBACK_PRICE);
        assert!(cache.refresh().await.is_err());
        assert!(cache.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_ignores_freshness() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3000.0), Ok(3500.0)]));
        let cache = cache_with(oracle.clone(), Arc::new(ManualClock::default()));

        cache.current_price().await;
        let refreshed = cache.refresh().await.unwrap();

        assert_eq!(oracle.calls(), 2);
        assert_eq!(cache.current_price().await, refreshed);
    }

    #[tokio::test]
    async fn test_concurrent_cold_lookups_share_one_fetch() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3000.0)]).with_delay_ms(50));
        let cache = Arc::new(cache_with(oracle.clone(), Arc::new(ManualClock::default())));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.current_price().await })
            })
            .collect();

        let mut prices = Vec::new();
        for handle in handles {
            prices.push(handle.await.unwrap());
        }

        assert_eq!(oracle.calls(), 1);
        assert!(prices.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_from_config_uses_window_and_fallback() {
        let config = Config {
            cache_valid_minutes: 5,
            fallback_gold_price: 99.5,
            ..Config::default()
        };
        let cache = PriceCache::from_config(Arc::new(ScriptedOracle::new(Vec::new())), &config);
        assert_eq!(cache.validity, Duration::minutes(5));
        assert_eq!(cache.fallback_price, 99.5);
    }

    #[test]
    fn test_from_config_out_of_range_window_uses_default() {
        let config = Config {
            cache_valid_minutes: 1 << 60,
            ..Config::default()
        };
        let cache = PriceCache::from_config(Arc::new(ScriptedOracle::new(Vec::new())), &config);
        assert_eq!(cache.validity, Duration::minutes(DEFAULT_VALIDITY_MINUTES));
    }

    #[tokio::test]
    async fn test_outage_waiters_share_one_failed_fetch() {
        let oracle = Arc::new(ScriptedOracle::new(Vec::new()).with_delay_ms(200));
        let cache = Arc::new(cache_with(oracle.clone(), Arc::new(ManualClock::default())));

        let started = std::time::Instant::now();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.current_price().await })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.unwrap(), DEFAULT_FALLBACK_PRICE);
        }

        assert_eq!(oracle.calls(), 1);
        assert!(started.elapsed() < std::time::Duration::from_millis(1000));
        let stats = cache.stats().await;
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.fallback_served, 8);
    }

    #[tokio::test]
    async fn test_outage_waiters_get_stale_price() {
        let oracle = Arc::new(
            ScriptedOracle::new(vec![Ok(GRAMS_PER_TROY_OUNCE * 90.0)]).with_delay_ms(100),
        );
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(cache_with(oracle.clone(), clock.clone()));
        cache.current_price().await;
        clock.advance(Duration::minutes(20));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.quote().await })
            })
            .collect();

        for handle in handles {
            let quote = handle.await.unwrap();
            assert!((quote.price_per_gram - 90.0).abs() < 1e-9);
            assert!(quote.entry.is_some());
        }
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_later_lookup_retries_after_outage() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            Err(CatalogError::Upstream("down".to_string())),
            Ok(GRAMS_PER_TROY_OUNCE * 95.0),
        ]));
        let cache = cache_with(oracle.clone(), Arc::new(ManualClock::default()));

        assert_eq!(cache.current_price().await, DEFAULT_FALLBACK_PRICE);
        assert!((cache.current_price().await - 95.0).abs() < 1e-9);
        assert_eq!(oracle.calls(), 2);
    }

    #[tokio::test]
    async fn test_quote_matches_snapshot() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3000.0)]));
        let cache = cache_with(oracle, Arc::new(ManualClock::default()));

        let quote = cache.quote().await;
        assert_eq!(quote.entry, cache.snapshot().await);
        assert_eq!(quote.entry.unwrap().price_per_gram, quote.price_per_gram);
    }

    #[tokio::test]
    async fn test_quote_without_entry_is_fallback() {
        let cache = cache_with(
            Arc::new(ScriptedOracle::new(Vec::new())),
            Arc::new(ManualClock::default()),
        );

        let quote = cache.quote().await;
        assert_eq!(quote.price_per_gram, DEFAULT_FALLBACK_PRICE);
        assert!(quote.entry.is_none());
    }

    #[tokio::test]
    async fn test_expires_within() {
        let oracle = Arc::new(ScriptedOracle::new(vec![Ok(3000.0)]));
        let clock = Arc::new(ManualClock::default());
        let cache = cache_with(oracle, clock.clone());

        assert!(!cache.expires_within(Duration::minutes(60)).await);

        cache.current_price().await;
        clock.advance(Duration::minutes(14));
        assert!(!cache.expires_within(Duration::seconds(30)).await);
        assert!(cache.expires_within(Duration::minutes(1)).await);
    }
}
