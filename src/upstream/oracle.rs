//! Gold price API client
//!
//! The API answers `GET {url}` with a JSON object carrying the spot price in
//! USD per troy ounce, e.g. `{"name": "Gold", "price": 3325.6, ...}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::{CatalogError, Result};
use crate::upstream::PriceOracle;

#[derive(Debug, Deserialize)]
struct QuotePayload {
    price: f64,
}

/// Fetches the gold spot price over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPriceOracle {
    client: Client,
    url: String,
}

impl HttpPriceOracle {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn fetch_ounce_price(&self) -> Result<f64> {
        debug!("Fetching gold price from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Upstream(format!(
                "Gold price API error: {}",
                status
            )));
        }

        let quote: QuotePayload = response
            .json()
            .await
            .map_err(|e| CatalogError::Upstream(format!("malformed gold price payload: {}", e)))?;

        if !quote.price.is_finite() || quote.price <= 0.0 {
            return Err(CatalogError::Upstream(format!(
                "gold price API returned an invalid price: {}",
                quote.price
            )));
        }

        Ok(quote.price)
    }

    fn source(&self) -> String {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .unwrap_or_else(|| self.url.clone())
    }
}
