//! Product records
//!
//! The base catalog record and its priced form, in the camelCase wire format
//! shared with the CMS and the frontend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Formula tag carried in every price audit record.
pub const PRICE_FORMULA: &str = "(popularityScore + 1) * weight * goldPrice";

// == Metal Color ==
/// Gold color variant a product image is shot in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetalColor {
    Yellow,
    White,
    Rose,
}

// == Product ==
/// A sellable catalog item as loaded from the CMS or the fallback list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    /// Weight in grams
    pub weight: f64,
    /// Normalized demand score in [0, 1]
    pub popularity_score: f64,
    /// Image URL per color variant
    #[serde(default)]
    pub images: BTreeMap<MetalColor, String>,
}

impl Product {
    /// Validates the record.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Some(format!(
                "Product {} has a non-positive weight: {}",
                self.id, self.weight
            ));
        }
        if !(0.0..=1.0).contains(&self.popularity_score) {
            return Some(format!(
                "Product {} has a popularity score outside [0, 1]: {}",
                self.id, self.popularity_score
            ));
        }
        None
    }
}

// == Price Calculation ==
/// Audit record of how a product price was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCalculation {
    pub formula: String,
    pub popularity_score: f64,
    pub weight: f64,
    pub gold_price: f64,
    pub calculated_price: f64,
}

// == Priced Product ==
/// A product with its computed price for the current request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Price in USD, rounded to cents
    pub price: f64,
    /// Gold price per gram the price was computed from
    pub gold_price_used: f64,
    pub price_calculation: PriceCalculation,
}
