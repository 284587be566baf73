//! Pricing Module
//!
//! Derives product prices from popularity, weight and the gold price per gram:
//!
//! `price = round2((popularityScore + 1) * weight * goldPrice)`
//!
//! Rounding is half away from zero to whole cents.

use crate::models::{PriceCalculation, PricedProduct, Product, PRICE_FORMULA};

/// Grams in one troy ounce
pub const GRAMS_PER_TROY_OUNCE: f64 = 31.1035;

/// Rounds to two decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Converts a per-troy-ounce quote to a per-gram price.
pub fn ounce_to_gram(price_per_ounce: f64) -> f64 {
    price_per_ounce / GRAMS_PER_TROY_OUNCE
}

/// Computes the USD price of a product.
pub fn compute_price(popularity_score: f64, weight: f64, price_per_gram: f64) -> f64 {
    round2((popularity_score + 1.0) * weight * price_per_gram)
}

/// Prices every product at `price_per_gram`, keeping catalog order.
pub fn annotate_catalog(products: &[Product], price_per_gram: f64) -> Vec<PricedProduct> {
    products
        .iter()
        .map(|product| price_product(product, price_per_gram))
        .collect()
}

fn price_product(product: &Product, price_per_gram: f64) -> PricedProduct {
    let price = compute_price(product.popularity_score, product.weight, price_per_gram);
    PricedProduct {
        product: product.clone(),
        price,
        gold_price_used: price_per_gram,
        price_calculation: PriceCalculation {
            formula: PRICE_FORMULA.to_string(),
            popularity_score: product.popularity_score,
            weight: product.weight,
            gold_price: price_per_gram,
            calculated_price: price,
        },
    }
}
