//! Strapi CMS client
//!
//! Reads `GET {base}/api/products?populate=*`. Strapi wraps results in a
//! `data` array; Strapi 5 returns flat entries while Strapi 4 nests the
//! fields under `attributes`. Both shapes are accepted.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::models::Product;
use crate::upstream::ProductFeed;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Vec<Value>,
}

/// Product feed backed by the Strapi REST API.
#[derive(Debug, Clone)]
pub struct StrapiFeed {
    client: Client,
    base_url: String,
}

impl StrapiFeed {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn products_url(&self) -> String {
        format!("{}/api/products?populate=*", self.base_url)
    }
}

#[async_trait]
impl ProductFeed for StrapiFeed {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let url = self.products_url();
        debug!("Connecting to Strapi at {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Upstream(format!("Strapi API error: {}", status)));
        }

        let envelope: Envelope = response
            .json()
            .await
            .map_err(|e| CatalogError::Upstream(format!("malformed Strapi payload: {}", e)))?;

        Ok(parse_entries(envelope.data))
    }
}

/// Maps raw Strapi entries to products, dropping the ones that don't fit.
fn parse_entries(entries: Vec<Value>) -> Vec<Product> {
    entries
        .into_iter()
        .filter_map(|entry| match parse_entry(entry) {
            Ok(product) => Some(product),
            Err(reason) => {
                warn!("Skipping Strapi product: {}", reason);
                None
            }
        })
        .collect()
}

fn parse_entry(entry: Value) -> std::result::Result<Product, String> {
    let entry = flatten_attributes(entry);
    let product: Product = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    match product.validate() {
        Some(reason) => Err(reason),
        None => Ok(product),
    }
}

/// Lifts Strapi 4 `attributes` to the top level next to `id`.
fn flatten_attributes(entry: Value) -> Value {
    match entry {
        Value::Object(mut map) => {
            if let Some(Value::Object(attributes)) = map.remove("attributes") {
                for (key, value) in attributes {
                    map.entry(key).or_insert(value);
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
