//! Integration Tests for the Upstream Clients
//!
//! Runs the HTTP gold price oracle and the Strapi feed against a local axum
//! server standing in for both services.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use gold_catalog::{
    error::CatalogError,
    upstream::{http_client, HttpPriceOracle, PriceOracle, ProductFeed, StrapiFeed},
};
use serde_json::{json, Value};

// == Helper Functions ==

async fn strapi_products() -> Json<Value> {
    Json(json!({
        "data": [
            {
                "id": 1,
                "documentId": "a1",
                "name": "Engagement Ring 1",
                "weight": 2.1,
                "popularityScore": 0.85,
                "images": {"yellow": "y.jpg", "rose": "r.jpg", "white": "w.jpg"}
            },
            {
                "id": 2,
                "attributes": {
                    "name": "Engagement Ring 2",
                    "weight": 3.4,
                    "popularityScore": 0.51
                }
            },
            {
                "id": 3,
                "name": "Broken Ring",
                "weight": -1.0,
                "popularityScore": 0.5
            }
        ],
        "meta": {"pagination": {"page": 1, "pageSize": 25, "total": 3}}
    }))
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/api/products", get(strapi_products))
        .route("/price/XAU", get(|| async { Json(json!({"name": "Gold", "price": 3110.35})) }))
        .route("/price/zero", get(|| async { Json(json!({"price": 0})) }))
        .route("/price/garbage", get(|| async { "not json" }))
        .route(
            "/price/down",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance") }),
        )
        .route(
            "/price/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"price": 3000.0}))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn oracle(addr: SocketAddr, path: &str, timeout: Duration) -> HttpPriceOracle {
    HttpPriceOracle::new(
        http_client(timeout).unwrap(),
        format!("http://{}{}", addr, path),
    )
}

// == Gold Price Oracle Tests ==

#[tokio::test]
async fn test_oracle_reads_price() {
    let addr = spawn_upstream().await;
    let oracle = oracle(addr, "/price/XAU", Duration::from_secs(2));

    let price = oracle.fetch_ounce_price().await.unwrap();

    assert!((price - 3110.35).abs() < 1e-9);
    assert_eq!(oracle.source(), "127.0.0.1");
}

#[tokio::test]
async fn test_oracle_error_status() {
    let addr = spawn_upstream().await;
    let oracle = oracle(addr, "/price/down", Duration::from_secs(2));

    let result = oracle.fetch_ounce_price().await;

    assert!(matches!(result, Err(CatalogError::Upstream(msg)) if msg.contains("503")));
}

#[tokio::test]
async fn test_oracle_rejects_malformed_payload() {
    let addr = spawn_upstream().await;
    let oracle = oracle(addr, "/price/garbage", Duration::from_secs(2));

    assert!(matches!(
        oracle.fetch_ounce_price().await,
        Err(CatalogError::Upstream(_))
    ));
}

#[tokio::test]
async fn test_oracle_rejects_zero_price() {
    let addr = spawn_upstream().await;
    let oracle = oracle(addr, "/price/zero", Duration::from_secs(2));

    assert!(matches!(
        oracle.fetch_ounce_price().await,
        Err(CatalogError::Upstream(_))
    ));
}

#[tokio::test]
async fn test_oracle_times_out() {
    let addr = spawn_upstream().await;
    let oracle = oracle(addr, "/price/slow", Duration::from_millis(200));

    assert!(matches!(
        oracle.fetch_ounce_price().await,
        Err(CatalogError::Upstream(_))
    ));
}

#[tokio::test]
async fn test_oracle_unreachable() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let oracle = oracle(addr, "/price/XAU", Duration::from_secs(1));

    assert!(matches!(
        oracle.fetch_ounce_price().await,
        Err(CatalogError::Upstream(_))
    ));
}

// == Strapi Feed Tests ==

#[tokio::test]
async fn test_strapi_feed_reads_both_entry_shapes() {
    let addr = spawn_upstream().await;
    let feed = StrapiFeed::new(
        http_client(Duration::from_secs(2)).unwrap(),
        format!("http://{}/", addr),
    );

    let products = feed.fetch_products().await.unwrap();

    let ids: Vec<u64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(products[1].name, "Engagement Ring 2");
    assert!(products[1].images.is_empty());
}

#[tokio::test]
async fn test_strapi_feed_missing_route() {
    let addr = spawn_upstream().await;
    let feed = StrapiFeed::new(
        http_client(Duration::from_secs(2)).unwrap(),
        format!("http://{}/cms", addr),
    );

    assert!(matches!(
        feed.fetch_products().await,
        Err(CatalogError::Upstream(msg)) if msg.contains("404")
    ));
}
