//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the Strapi CMS
    pub strapi_url: String,
    /// Gold spot price endpoint (quotes USD per troy ounce)
    pub gold_api_url: String,
    /// How long a fetched gold price stays fresh, in minutes
    pub cache_valid_minutes: u64,
    /// Price per gram used when no gold price was ever fetched
    pub fallback_gold_price: f64,
    /// Timeout in seconds for outbound CMS and gold price requests
    pub http_timeout: u64,
    /// Background price refresh interval in seconds (0 disables the task)
    pub refresh_interval: u64,
    /// Optional products.json replacing the built-in fallback catalog
    pub products_file: Option<PathBuf>,
    /// Directory of static frontend assets
    pub static_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `STRAPI_URL` - CMS base URL (default: http://localhost:1337)
    /// - `GOLD_API_URL` - Gold price endpoint (default: https://api.gold-api.com/price/XAU)
    /// - `GOLD_CACHE_MINUTES` - Gold price validity window (default: 15)
    /// - `FALLBACK_GOLD_PRICE` - Price per gram when nothing is cached (default: 106.93)
    /// - `HTTP_TIMEOUT_SECS` - Outbound request timeout (default: 10)
    /// - `PRICE_REFRESH_INTERVAL` - Background refresh frequency in seconds (default: 60)
    /// - `PRODUCTS_FILE` - Path to a products.json fallback catalog (default: unset)
    /// - `STATIC_DIR` - Static asset directory (default: public)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            strapi_url: env::var("STRAPI_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.strapi_url),
            gold_api_url: env::var("GOLD_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.gold_api_url),
            cache_valid_minutes: parse_var("GOLD_CACHE_MINUTES")
                .unwrap_or(defaults.cache_valid_minutes),
            fallback_gold_price: parse_var::<f64>("FALLBACK_GOLD_PRICE")
                .filter(|p| p.is_finite() && *p > 0.0)
                .unwrap_or(defaults.fallback_gold_price),
            http_timeout: parse_var("HTTP_TIMEOUT_SECS").unwrap_or(defaults.http_timeout),
            refresh_interval: parse_var("PRICE_REFRESH_INTERVAL")
                .unwrap_or(defaults.refresh_interval),
            products_file: env::var("PRODUCTS_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            static_dir: env::var("STATIC_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            strapi_url: "http://localhost:1337".to_string(),
            gold_api_url: "https://api.gold-api.com/price/XAU".to_string(),
            cache_valid_minutes: 15,
            fallback_gold_price: 106.93,
            http_timeout: 10,
            refresh_interval: 60,
            products_file: None,
            static_dir: PathBuf::from("public"),
        }
    }
}
