//! Price Refresh Task
//!
//! Keeps the gold price cache warm so request handlers rarely wait on the
//! price API.

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::PriceCache;
use crate::catalog::Catalog;

/// Spawns a background task that periodically looks up the gold price.
///
/// A tick whose cached price would expire before the next tick refreshes it
/// ahead of time. Other ticks go through `PriceCache::current_price`, which
/// only calls the oracle when nothing is cached. Returns None when
/// `interval_secs` is 0.
///
/// # Arguments
/// * `cache` - Shared gold price cache
/// * `interval_secs` - Interval in seconds between lookups
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_price_refresh_task(
    cache: Arc<PriceCache>,
    interval_secs: u64,
) -> Option<JoinHandle<()>> {
    if interval_secs == 0 {
        info!("Gold price refresh task disabled");
        return None;
    }

    let interval = Duration::from_secs(interval_secs);
    let ahead = ChronoDuration::from_std(interval).unwrap_or_else(|_| ChronoDuration::zero());

    Some(tokio::spawn(async move {
        info!(
            "Starting gold price refresh task with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            if cache.expires_within(ahead).await {
                match cache.refresh().await {
                    Ok(price) => debug!("Gold price refreshed ahead: {:.4} USD/g", price),
                    Err(err) => warn!("Gold price refresh failed: {}", err),
                }
            } else {
                let price = cache.current_price().await;
                debug!("Gold price refresh tick: {:.4} USD/g", price);
            }
        }
    }))
}

/// Primes the price cache and checks the catalog source once.
///
/// Never fails: both lookups fall back on their own.
pub async fn warm_up(cache: &PriceCache, catalog: &Catalog) {
    info!("Initializing gold price cache and catalog...");

    let quote = cache.quote().await;
    match quote.entry {
        Some(_) => info!("Gold price cache initialized: {:.4} USD/g", quote.price_per_gram),
        None => info!(
            "Gold price unavailable, using fallback {:.2} USD/g",
            quote.price_per_gram
        ),
    }

    let products = catalog.fetch_catalog().await;
    info!("Products loaded: {} items", products.len());
}
