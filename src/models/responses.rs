//! Response DTOs for the catalog API
//!
//! Defines the structure of outgoing HTTP response bodies. Field names follow
//! the camelCase format the frontend reads.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use crate::cache::{PriceCacheStats, PriceEntry};
use crate::models::PricedProduct;
use crate::query::{FilterCriteria, PageLink, PriceRange};

pub const CURRENCY: &str = "USD";
pub const PRICE_UNIT: &str = "per gram";

/// Response body for GET /api/gold-price
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldPriceResponse {
    pub price_per_gram: f64,
    pub currency: &'static str,
    /// When the cached price was fetched, null if it never was
    pub last_updated: Option<DateTime<Utc>>,
    pub source: String,
}

impl GoldPriceResponse {
    pub fn new(price_per_gram: f64, entry: Option<&PriceEntry>, source: impl Into<String>) -> Self {
        Self {
            price_per_gram,
            currency: CURRENCY,
            last_updated: entry.map(|e| e.fetched_at),
            source: source.into(),
        }
    }
}

/// Cached gold price snapshot attached to every product listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldPriceInfo {
    /// Cached price per gram, null when the fallback constant was used
    pub current_gold_price: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub currency: &'static str,
    pub unit: &'static str,
}

impl GoldPriceInfo {
    pub fn from_entry(entry: Option<&PriceEntry>) -> Self {
        Self {
            current_gold_price: entry.map(|e| e.price_per_gram),
            last_updated: entry.map(|e| e.fetched_at),
            currency: CURRENCY,
            unit: PRICE_UNIT,
        }
    }
}

/// Response body for GET /api/products
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub total_products: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub products: Vec<PricedProduct>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
    pub gold_price_info: GoldPriceInfo,
}

/// Response body for GET /api/products/filter/popular
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularResponse {
    pub min_popularity_score: f64,
    pub total_results: usize,
    pub products: Vec<PricedProduct>,
    pub gold_price_info: GoldPriceInfo,
}

/// Price bounds as echoed back to the client
#[derive(Debug, Clone, Serialize)]
pub struct PriceRangeBody {
    pub min: f64,
    /// Upper bound, or the string "unlimited"
    #[serde(serialize_with = "serialize_max_price")]
    pub max: Option<f64>,
}

impl From<PriceRange> for PriceRangeBody {
    fn from(range: PriceRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
        }
    }
}

fn serialize_max_price<S: Serializer>(max: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match max {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str("unlimited"),
    }
}

/// Response body for GET /api/products/filter/price
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceFilterResponse {
    pub price_range: PriceRangeBody,
    pub total_results: usize,
    pub products: Vec<PricedProduct>,
    pub gold_price_info: GoldPriceInfo,
}

/// Filters echoed back by GET /api/products/filter/combined
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedFilters {
    pub min_popularity: f64,
    pub price_range: PriceRangeBody,
}

impl From<FilterCriteria> for CombinedFilters {
    fn from(criteria: FilterCriteria) -> Self {
        Self {
            min_popularity: criteria.min_popularity,
            price_range: criteria.price.into(),
        }
    }
}

/// Response body for GET /api/products/filter/combined
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedFilterResponse {
    pub filters: CombinedFilters,
    pub total_results: usize,
    pub products: Vec<PricedProduct>,
    pub gold_price_info: GoldPriceInfo,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: PriceCacheStats,
    /// Share of price lookups answered from the cache
    pub hit_rate: f64,
    pub cached_price: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl StatsResponse {
    pub fn new(stats: PriceCacheStats, entry: Option<&PriceEntry>) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
            cached_price: entry.map(|e| e.price_per_gram),
            last_updated: entry.map(|e| e.fetched_at),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
