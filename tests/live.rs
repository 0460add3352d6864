//! Integration tests against the real Yahoo Finance API.
//!
//! # Running
//!
//! These tests hit the network. Opt in with:
//!
//! ```sh
//! export YAHOO_LIVE=1
//! export YAHOO_CRUMB="your-crumb"   # only needed for the details test
//! cargo test --test live -- --nocapture
//! ```
//!
//! Without `YAHOO_LIVE=1`, every test is silently skipped.

use chrono::Utc;
use etf_scout::client::YahooClient;
use etf_scout::config::Config;
use etf_scout::history::{HistoryRequest, get_history};
use etf_scout::types::Period;

/// A liquid, long-lived ETF.
const SYMBOL: &str = "SPY";

/// Helper: create a live client or skip the test.
fn live_client() -> Option<YahooClient> {
    if std::env::var("YAHOO_LIVE").ok()? != "1" {
        return None;
    }
    let config = Config::from_env().ok()?;
    YahooClient::from_config(&config).ok()
}

/// Macro to skip a test when live testing is not enabled.
macro_rules! require_client {
    () => {
        match live_client() {
            Some(c) => c,
            None => {
                eprintln!("⏭  Skipped (YAHOO_LIVE not set)");
                return;
            }
        }
    };
}

#[tokio::test]
async fn test_every_period_returns_points() {
    let client = require_client!();
    for period in Period::ALL {
        let prices = get_history(&client, SYMBOL, &HistoryRequest::Period(period), Utc::now()).await;
        assert!(!prices.is_empty(), "{period} returned no points");
        assert!(prices.windows(2).all(|w| w[0].date < w[1].date), "{period} not ordered");
        println!("✔ {period}: {} points", prices.len());
    }
}

#[tokio::test]
async fn test_explicit_range() {
    let client = require_client!();
    let request = HistoryRequest::from_params(None, Some("2024-01-02"), Some("2024-02-01")).unwrap();
    let prices = get_history(&client, SYMBOL, &request, Utc::now()).await;
    assert!(prices.len() >= 15, "expected ~21 trading days, got {}", prices.len());
    println!("✔ Range: {} daily points", prices.len());
}

#[tokio::test]
async fn test_unknown_symbol_is_empty() {
    let client = require_client!();
    let prices = get_history(&client, "NOT-A-REAL-TICKER-XYZ", &HistoryRequest::default(), Utc::now()).await;
    assert!(prices.is_empty());
    println!("✔ Unknown symbol: empty series");
}

#[tokio::test]
async fn test_details() {
    let client = require_client!();
    if client.crumb().is_none() {
        eprintln!("⏭  Skipped (YAHOO_CRUMB not set)");
        return;
    }
    let details = client.get_etf_details(SYMBOL).await.expect("get_etf_details failed");
    assert!(!details.name.is_empty());
    println!("✔ Details: {} mer={:?} price={:?}", details.name, details.mer, details.current_price);
}
