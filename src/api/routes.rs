//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use std::any::Any;
use std::path::Path;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::error;

use super::handlers::{
    combined_filter_handler, get_product_handler, gold_price_handler, health_handler,
    list_products_handler, popular_products_handler, price_filter_handler, stats_handler,
    AppState,
};
use crate::error::CatalogError;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/gold-price` - Current gold price per gram
/// - `GET /api/products` - Paginated product listing
/// - `GET /api/products/:id` - Single priced product
/// - `GET /api/products/filter/popular` - Popularity filter
/// - `GET /api/products/filter/price` - Price range filter
/// - `GET /api/products/filter/combined` - Popularity and price filter
/// - `GET /stats` - Gold price cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin so the frontend can be hosted anywhere
/// - Tracing: Logs all requests for debugging
/// - Catch panic: Turns handler panics into 500 `{message}` responses
pub fn create_router(state: AppState) -> Router {
    build_router(state, None)
}

/// Same as [`create_router`], additionally serving static frontend assets
/// from `static_dir` for every path no endpoint matches.
pub fn create_router_with_assets(state: AppState, static_dir: &Path) -> Router {
    build_router(state, Some(static_dir))
}

fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let mut router = Router::new()
        .route("/api/gold-price", get(gold_price_handler))
        .route("/api/products", get(list_products_handler))
        .route("/api/products/filter/popular", get(popular_products_handler))
        .route("/api/products/filter/price", get(price_filter_handler))
        .route("/api/products/filter/combined", get(combined_filter_handler))
        .route("/api/products/:id", get(get_product_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler));

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };
    error!("Request handler panicked: {}", detail);

    CatalogError::Internal(detail).into_response()
}
