//! Background Tasks Module
//!
//! Contains tasks that run alongside the HTTP server.
//!
//! # Tasks
//! - Warm-up: primes the gold price cache and checks the CMS at startup
//! - Price refresh: keeps the gold price cache warm at configured intervals

mod refresh;

pub use refresh::{spawn_price_refresh_task, warm_up};
