//! Data models for the catalog server
//!
//! Product records plus the DTOs used for serializing/deserializing HTTP
//! query strings and response bodies.

pub mod product;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{MetalColor, PriceCalculation, PricedProduct, Product, PRICE_FORMULA};
pub use requests::{CombinedQuery, PageQuery, PopularQuery, PriceQuery};
pub use responses::{
    CombinedFilterResponse, ErrorResponse, GoldPriceInfo, GoldPriceResponse, HealthResponse,
    PopularResponse, PriceFilterResponse, ProductListResponse, StatsResponse,
};
