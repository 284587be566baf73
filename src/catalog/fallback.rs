//! Built-in Catalog Module
//!
//! Products served when neither the CMS nor a products file can supply any.

use std::collections::BTreeMap;

use crate::models::{MetalColor, Product};

const CDN: &str = "https://cdn.shopify.com/s/files/1/0484/1429/4167/files";

fn ring(id: u64, weight: f64, popularity_score: f64, images: [&str; 3]) -> Product {
    let [yellow, rose, white] = images;
    Product {
        id,
        name: format!("Engagement Ring {}", id),
        weight,
        popularity_score,
        images: BTreeMap::from([
            (MetalColor::Yellow, format!("{}/{}", CDN, yellow)),
            (MetalColor::Rose, format!("{}/{}", CDN, rose)),
            (MetalColor::White, format!("{}/{}", CDN, white)),
        ]),
    }
}

/// The built-in catalog of eight engagement rings.
pub fn fallback_products() -> Vec<Product> {
    vec![
        ring(
            1,
            2.1,
            0.85,
            [
                "EG085-100P-Y.jpg?v=1696588368",
                "EG085-100P-R.jpg?v=1696588406",
                "EG085-100P-W.jpg?v=1696588402",
            ],
        ),
        ring(
            2,
            3.4,
            0.51,
            [
                "EG012-Y.jpg?v=1707727068",
                "EG012-R.jpg?v=1707727068",
                "EG012-W.jpg?v=1707727068",
            ],
        ),
        ring(
            3,
            3.8,
            0.92,
            [
                "EG020-100P-Y.jpg?v=1683534032",
                "EG020-100P-R.jpg?v=1683534032",
                "EG020-100P-W.jpg?v=1683534032",
            ],
        ),
        ring(
            4,
            4.5,
            0.88,
            [
                "EG022-100P-Y.jpg?v=1683532153",
                "EG022-100P-R.jpg?v=1683532153",
                "EG022-100P-W.jpg?v=1683532153",
            ],
        ),
        ring(
            5,
            2.5,
            0.8,
            [
                "EG074-100P-Y.jpg?v=1696232035",
                "EG074-100P-R.jpg?v=1696927124",
                "EG074-100P-W.jpg?v=1696927124",
            ],
        ),
        ring(
            6,
            1.8,
            0.82,
            [
                "EG075-100P-Y.jpg?v=1696591786",
                "EG075-100P-R.jpg?v=1696591802",
                "EG075-100P-W.jpg?v=1696591798",
            ],
        ),
        ring(
            7,
            5.2,
            0.7,
            [
                "EG094-100P-Y.jpg?v=1696589183",
                "EG094-100P-R.jpg?v=1696589214",
                "EG094-100P-W.jpg?v=1696589210",
            ],
        ),
        ring(
            8,
            2.9,
            0.76,
            [
                "EG098-100P-Y.jpg?v=1696589562",
                "EG098-100P-R.jpg?v=1696589594",
                "EG098-100P-W.jpg?v=1696589589",
            ],
        ),
    ]
}
