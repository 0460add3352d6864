//! # etf-scout
//!
//! Backend pieces of an ETF discovery app: a Yahoo Finance client, a
//! price-history normalizer that turns irregular candle data into clean
//! chart series, fund metadata lookup and cached route handlers.
//!
//! ## Quick Start
//!
//! ```no_run
//! use etf_scout::routes::{EtfRoutes, HistoryParams};
//! use etf_scout::{Config, ResponseCache, YahooClient};
//!
//! #[tokio::main]
//! async fn main() -> etf_scout::error::Result<()> {
//!     let config = Config::from_env()?;
//!     let routes = EtfRoutes::new(YahooClient::from_config(&config)?, ResponseCache::from_config(&config));
//!     let params = HistoryParams { period: Some("5D".into()), ..Default::default() };
//!     if let Ok(body) = routes.history("VOO", &params).await {
//!         println!("{} points", body.prices.len());
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod routes;
pub mod types;

/// Re-export the main client type at crate root for convenience.
pub use client::YahooClient;
/// Re-export the error type and Result alias.
pub use error::{EtfError, Result};

pub use cache::ResponseCache;
pub use config::Config;
