//! Product Filters
//!
//! All bounds are inclusive. Popularity-based results are ordered by
//! popularity score descending, price-only results by price ascending, and
//! unfiltered results keep catalog order. Sorting is stable, so ties keep
//! catalog order too.

use crate::models::PricedProduct;

// == Price Range ==
/// Inclusive price bounds; `max: None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: f64, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Range accepting every price.
    pub fn unbounded() -> Self {
        Self::new(0.0, None)
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

// == Filter Criteria ==
/// Popularity and price constraints applied together.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterCriteria {
    pub min_popularity: f64,
    pub price: PriceRange,
}

impl FilterCriteria {
    pub fn matches(&self, product: &PricedProduct) -> bool {
        product.product.popularity_score >= self.min_popularity && self.price.contains(product.price)
    }
}

// == Product Filter ==
/// One of the listing modes the API exposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProductFilter {
    /// Everything, in catalog order
    All,
    /// Popularity at least the bound, most popular first
    Popular(f64),
    /// Price within the range, cheapest first
    Price(PriceRange),
    /// Both constraints, most popular first
    Combined(FilterCriteria),
}

impl ProductFilter {
    /// Filters and orders `products` without modifying them.
    pub fn apply(&self, products: &[PricedProduct]) -> Vec<PricedProduct> {
        match self {
            ProductFilter::All => products.to_vec(),
            ProductFilter::Popular(min) => filter_popular(products, *min),
            ProductFilter::Price(range) => filter_by_price(products, range),
            ProductFilter::Combined(criteria) => filter_combined(products, criteria),
        }
    }
}

/// Products with `popularityScore >= min_popularity`, most popular first.
pub fn filter_popular(products: &[PricedProduct], min_popularity: f64) -> Vec<PricedProduct> {
    let mut matched: Vec<PricedProduct> = products
        .iter()
        .filter(|p| p.product.popularity_score >= min_popularity)
        .cloned()
        .collect();
    sort_by_popularity_desc(&mut matched);
    matched
}

/// Products priced within `range`, cheapest first.
pub fn filter_by_price(products: &[PricedProduct], range: &PriceRange) -> Vec<PricedProduct> {
    let mut matched: Vec<PricedProduct> = products
        .iter()
        .filter(|p| range.contains(p.price))
        .cloned()
        .collect();
    matched.sort_by(|a, b| a.price.total_cmp(&b.price));
    matched
}

/// Products meeting both constraints, most popular first.
pub fn filter_combined(products: &[PricedProduct], criteria: &FilterCriteria) -> Vec<PricedProduct> {
    let mut matched: Vec<PricedProduct> = products
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect();
    sort_by_popularity_desc(&mut matched);
    matched
}

fn sort_by_popularity_desc(products: &mut [PricedProduct]) {
    products.sort_by(|a, b| {
        b.product
            .popularity_score
            .total_cmp(&a.product.popularity_score)
    });
}
