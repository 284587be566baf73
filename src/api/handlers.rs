//! API Handlers
//!
//! HTTP request handlers for each catalog endpoint. Every listing request
//! runs the same chain: fetch the catalog, look up the gold price, price the
//! products, then filter and paginate.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::PriceCache;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    CombinedFilterResponse, CombinedQuery, GoldPriceInfo, GoldPriceResponse, HealthResponse,
    PageQuery, PopularQuery, PopularResponse, PriceFilterResponse, PriceQuery, PricedProduct,
    ProductListResponse, StatsResponse,
};
use crate::pricing::annotate_catalog;
use crate::query::{query, ProductFilter};
use crate::upstream::{http_client, HttpPriceOracle, StrapiFeed};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Product source with fallback
    pub catalog: Arc<Catalog>,
    /// Shared gold price cache
    pub prices: Arc<PriceCache>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(catalog: Catalog, prices: PriceCache) -> Self {
        Self {
            catalog: Arc::new(catalog),
            prices: Arc::new(prices),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Wires the Strapi feed and the gold price API behind one HTTP client
    /// bounded by the configured timeout.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = http_client(Duration::from_secs(config.http_timeout))?;

        let feed = Arc::new(StrapiFeed::new(client.clone(), config.strapi_url.clone()));
        let oracle = Arc::new(HttpPriceOracle::new(client, config.gold_api_url.clone()));

        Ok(Self::new(
            Catalog::from_config(feed, config),
            PriceCache::from_config(oracle, config),
        ))
    }

    /// Loads and prices the catalog for one request.
    ///
    /// The products and `goldPriceInfo` come from the same price lookup.
    async fn priced_catalog(&self) -> (Vec<PricedProduct>, GoldPriceInfo) {
        let products = self.catalog.fetch_catalog().await;
        let quote = self.prices.quote().await;
        let info = GoldPriceInfo::from_entry(quote.entry.as_ref());
        (annotate_catalog(&products, quote.price_per_gram), info)
    }
}

/// Handler for GET /api/gold-price
pub async fn gold_price_handler(State(state): State<AppState>) -> Json<GoldPriceResponse> {
    let quote = state.prices.quote().await;

    Json(GoldPriceResponse::new(
        quote.price_per_gram,
        quote.entry.as_ref(),
        state.prices.source(),
    ))
}

/// Handler for GET /api/products?page=&limit=
///
/// Lists the catalog in catalog order, one page at a time.
pub async fn list_products_handler(
    State(state): State<AppState>,
    params: Option<Query<PageQuery>>,
) -> Json<ProductListResponse> {
    let params = params.map(|Query(q)| q).unwrap_or_default();
    let pagination = params.pagination();

    let (products, gold_price_info) = state.priced_catalog().await;
    let result = query(&products, &ProductFilter::All, Some(pagination));
    let info = result
        .page_info
        .unwrap_or_else(|| pagination.page_info(result.total_results));

    Json(ProductListResponse {
        total_products: result.total_results,
        total_pages: info.total_pages,
        current_page: info.current_page,
        products: result.products,
        next: info.next,
        previous: info.previous,
        gold_price_info,
    })
}

/// Handler for GET /api/products/:id
///
/// Ids that are not numbers can't match any product and are not found too.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PricedProduct>> {
    let id: u64 = id
        .trim()
        .parse()
        .map_err(|_| CatalogError::NotFound("Product not found".to_string()))?;

    let (products, _) = state.priced_catalog().await;
    products
        .into_iter()
        .find(|p| p.product.id == id)
        .map(Json)
        .ok_or_else(|| CatalogError::NotFound("Product not found".to_string()))
}

/// Handler for GET /api/products/filter/popular?minScore=
pub async fn popular_products_handler(
    State(state): State<AppState>,
    params: Option<Query<PopularQuery>>,
) -> Json<PopularResponse> {
    let params = params.map(|Query(q)| q).unwrap_or_default();
    let min_score = params.min_score();

    let (products, gold_price_info) = state.priced_catalog().await;
    let result = query(&products, &ProductFilter::Popular(min_score), None);

    Json(PopularResponse {
        min_popularity_score: min_score,
        total_results: result.total_results,
        products: result.products,
        gold_price_info,
    })
}

/// Handler for GET /api/products/filter/price?minPrice=&maxPrice=
pub async fn price_filter_handler(
    State(state): State<AppState>,
    params: Option<Query<PriceQuery>>,
) -> Json<PriceFilterResponse> {
    let params = params.map(|Query(q)| q).unwrap_or_default();
    let range = params.price_range();

    let (products, gold_price_info) = state.priced_catalog().await;
    let result = query(&products, &ProductFilter::Price(range), None);

    Json(PriceFilterResponse {
        price_range: range.into(),
        total_results: result.total_results,
        products: result.products,
        gold_price_info,
    })
}

/// Handler for GET /api/products/filter/combined?minPopularity=&minPrice=&maxPrice=
pub async fn combined_filter_handler(
    State(state): State<AppState>,
    params: Option<Query<CombinedQuery>>,
) -> Json<CombinedFilterResponse> {
    let params = params.map(|Query(q)| q).unwrap_or_default();
    let criteria = params.criteria();

    let (products, gold_price_info) = state.priced_catalog().await;
    let result = query(&products, &ProductFilter::Combined(criteria), None);

    Json(CombinedFilterResponse {
        filters: criteria.into(),
        total_results: result.total_results,
        products: result.products,
        gold_price_info,
    })
}

/// Handler for GET /stats
///
/// Returns gold price cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.prices.stats().await;
    let entry = state.prices.snapshot().await;

    Json(StatsResponse::new(stats, entry.as_ref()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
