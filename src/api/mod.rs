//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `GET /api/gold-price` - Current gold price per gram
//! - `GET /api/products` - Paginated product listing
//! - `GET /api/products/:id` - Single priced product
//! - `GET /api/products/filter/{popular,price,combined}` - Filtered listings
//! - `GET /stats` - Gold price cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, create_router_with_assets};
