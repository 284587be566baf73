//! Catalog Source Module
//!
//! Loads the product list for a request: the CMS when it answers with
//! products, the fallback list otherwise. Availability wins over freshness,
//! so fetching the catalog never fails.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::catalog::fallback_products;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::Product;
use crate::upstream::ProductFeed;

// == Catalog ==
/// Product source with a fallback list.
pub struct Catalog {
    feed: Option<Arc<dyn ProductFeed>>,
    fallback: Vec<Product>,
}

impl Catalog {
    // == Constructor ==
    /// Creates a catalog that asks `feed` first.
    pub fn new(feed: Arc<dyn ProductFeed>, fallback: Vec<Product>) -> Self {
        Self {
            feed: Some(feed),
            fallback,
        }
    }

    /// Creates a catalog that always serves `fallback`.
    pub fn offline(fallback: Vec<Product>) -> Self {
        Self {
            feed: None,
            fallback,
        }
    }

    /// Creates a catalog whose fallback comes from the configured products
    /// file, or the built-in list when there is none.
    pub fn from_config(feed: Arc<dyn ProductFeed>, config: &Config) -> Self {
        Self::new(feed, resolve_fallback(config.products_file.as_deref()))
    }

    // == Fetch Catalog ==
    /// Returns the current product list.
    ///
    /// A feed error or an empty feed answer both yield the fallback list.
    pub async fn fetch_catalog(&self) -> Vec<Product> {
        let Some(feed) = &self.feed else {
            return self.fallback.clone();
        };

        match feed.fetch_products().await {
            Ok(products) if !products.is_empty() => {
                debug!("Using {} products from the CMS", products.len());
                products
            }
            Ok(_) => {
                info!("No products in the CMS, using fallback products");
                self.fallback.clone()
            }
            Err(err) => {
                warn!("Error fetching products from the CMS: {}", err);
                self.fallback.clone()
            }
        }
    }
}

// == Products File ==
/// Reads a JSON array of products.
///
/// Entries that fail validation are dropped with a warning; an unreadable
/// file or invalid JSON is an error.
pub fn load_products_file(path: &Path) -> Result<Vec<Product>> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CatalogError::Internal(format!("cannot read {}: {}", path.display(), e))
    })?;
    let products: Vec<Product> = serde_json::from_str(&raw).map_err(|e| {
        CatalogError::Internal(format!("invalid products file {}: {}", path.display(), e))
    })?;

    Ok(products
        .into_iter()
        .filter(|product| match product.validate() {
            Some(reason) => {
                warn!("Skipping product from {}: {}", path.display(), reason);
                false
            }
            None => true,
        })
        .collect())
}

/// Picks the fallback list: the products file if it loads, else the
/// built-in catalog.
pub fn resolve_fallback(path: Option<&Path>) -> Vec<Product> {
    let Some(path) = path else {
        return fallback_products();
    };

    match load_products_file(path) {
        Ok(products) => {
            info!("Loaded {} fallback products from {}", products.len(), path.display());
            products
        }
        Err(err) => {
            warn!("{}, using built-in fallback products", err);
            fallback_products()
        }
    }
}
