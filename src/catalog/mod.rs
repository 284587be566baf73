//! Catalog Module
//!
//! Where products come from: the CMS feed, a products file, or the built-in
//! list.

mod fallback;
mod source;

pub use fallback::fallback_products;
pub use source::{load_products_file, resolve_fallback, Catalog};
