//! Gold Catalog - A product catalog API with live gold pricing
//!
//! Serves products from a Strapi CMS (falling back to a built-in catalog),
//! prices each one from a cached gold spot price, and exposes filtered,
//! paginated listings over HTTP.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod query;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_price_refresh_task, warm_up};
