//! Upstream Module
//!
//! Clients for the two external services the catalog depends on: the gold
//! spot price API and the Strapi CMS.

mod cms;
mod oracle;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::Product;

pub use cms::StrapiFeed;
pub use oracle::HttpPriceOracle;

// == Price Oracle ==
/// Source of the live gold spot price.
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Returns the current gold price in USD per troy ounce.
    async fn fetch_ounce_price(&self) -> Result<f64>;

    /// Human readable name of the price source.
    fn source(&self) -> String;
}

// == Product Feed ==
/// Remote source of catalog products.
#[async_trait]
pub trait ProductFeed: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
}

/// Builds the HTTP client shared by all upstream calls.
///
/// Every request is bounded by `timeout`; a timed out call is reported as an
/// upstream failure like any other.
pub fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("gold-catalog/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| crate::error::CatalogError::Internal(format!("HTTP client: {}", e)))
}
