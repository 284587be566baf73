//! Query Module
//!
//! Filtering, ordering and pagination over a priced catalog. Everything here
//! is a pure function of its inputs.

mod filter;
mod paginate;


pub use filter::{
    filter_by_price, filter_combined, filter_popular, FilterCriteria, PriceRange, ProductFilter,
};
pub use paginate::{
    paginate, Page, PageInfo, PageLink, Pagination, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};

use crate::models::PricedProduct;

/// Outcome of a catalog query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Matches before pagination
    pub total_results: usize,
    pub products: Vec<PricedProduct>,
    /// Present when the query was paginated
    pub page_info: Option<PageInfo>,
}

/// Applies `filter` to `products`, then slices to `pagination` if given.
pub fn query(
    products: &[PricedProduct],
    filter: &ProductFilter,
    pagination: Option<Pagination>,
) -> QueryResult {
    let matched = filter.apply(products);

    match pagination {
        Some(pagination) => {
            let page = paginate(&matched, pagination);
            QueryResult {
                total_results: page.total_results,
                products: page.items,
                page_info: Some(page.info),
            }
        }
        None => QueryResult {
            total_results: matched.len(),
            products: matched,
            page_info: None,
        },
    }
}
