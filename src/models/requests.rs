//! Request DTOs for the catalog API
//!
//! Query parameters arrive as raw strings and are parsed leniently: a value
//! that is missing or not a number falls back to the parameter's default
//! instead of rejecting the request.

use serde::Deserialize;

use crate::query::{FilterCriteria, Pagination, PriceRange};

/// Query string for GET /api/products
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageQuery {
    /// Resolves the requested page, clamping invalid values to the defaults.
    pub fn pagination(&self) -> Pagination {
        Pagination::new(
            parse_integer(self.page.as_deref()),
            parse_integer(self.limit.as_deref()),
        )
    }
}

/// Query string for GET /api/products/filter/popular
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularQuery {
    pub min_score: Option<String>,
}

impl PopularQuery {
    /// Minimum popularity score, 0 when absent or invalid.
    pub fn min_score(&self) -> f64 {
        parse_lower_bound(self.min_score.as_deref())
    }
}

/// Query string for GET /api/products/filter/price
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuery {
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl PriceQuery {
    pub fn price_range(&self) -> PriceRange {
        PriceRange::new(
            parse_lower_bound(self.min_price.as_deref()),
            parse_number(self.max_price.as_deref()),
        )
    }
}

/// Query string for GET /api/products/filter/combined
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedQuery {
    pub min_popularity: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
}

impl CombinedQuery {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            min_popularity: parse_lower_bound(self.min_popularity.as_deref()),
            price: PriceRange::new(
                parse_lower_bound(self.min_price.as_deref()),
                parse_number(self.max_price.as_deref()),
            ),
        }
    }
}

// == Parsing Helpers ==

/// Parses a finite number, None for anything else.
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parses a lower bound: missing, invalid and negative values become 0.
fn parse_lower_bound(raw: Option<&str>) -> f64 {
    parse_number(raw).filter(|v| *v > 0.0).unwrap_or(0.0)
}

/// Parses a positive integer; fractional input is truncated.
fn parse_integer(raw: Option<&str>) -> Option<usize> {
    parse_number(raw)
        .map(f64::trunc)
        .filter(|v| *v >= 1.0 && *v <= usize::MAX as f64)
        .map(|v| v as usize)
}
