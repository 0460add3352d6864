//! Route handler tests: status mapping, symbol normalization and caching.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, TimeZone, Utc};
use etf_scout::cache::ResponseCache;
use etf_scout::error::{ApiErrorBody, EtfError, Result};
use etf_scout::history::QuoteSource;
use etf_scout::routes::{DetailsSource, EtfRoutes, HistoryParams, RouteError};
use etf_scout::types::etf::EtfDetails;
use etf_scout::types::history::{ChartQuery, RawCandle};
use reqwest::StatusCode;

/// Counts calls; `DEAD` is an unknown symbol and `EMPTY` never has candles.
#[derive(Default)]
struct CountingProvider {
    charts: AtomicUsize,
    details: AtomicUsize,
}

#[async_trait]
impl QuoteSource for CountingProvider {
    async fn chart(&self, symbol: &str, _query: &ChartQuery) -> Result<Vec<RawCandle>> {
        self.charts.fetch_add(1, Ordering::SeqCst);
        if symbol == "EMPTY" {
            return Ok(Vec::new());
        }
        let open = Utc.with_ymd_and_hms(2024, 6, 14, 0, 0, 0).unwrap();
        Ok((0..3)
            .map(|d| RawCandle::new(open + TimeDelta::days(d), Some(100.0 + d as f64)))
            .collect())
    }
}

#[async_trait]
impl DetailsSource for CountingProvider {
    async fn etf_details(&self, symbol: &str) -> Result<EtfDetails> {
        self.details.fetch_add(1, Ordering::SeqCst);
        match symbol {
            "DEAD" => Err(EtfError::Api(ApiErrorBody {
                code: Some("Not Found".into()),
                description: Some("Quote not found".into()),
            })),
            "FLAKY" => Err(EtfError::HttpStatus {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: String::new(),
            }),
            _ => Ok(EtfDetails {
                symbol: symbol.to_owned(),
                name: format!("{symbol} Fund"),
                description: String::new(),
                mer: Some(0.1),
                exchange: Some("NYSEArca".into()),
                currency: Some("USD".into()),
                current_price: Some(42.0),
                product_url: None,
                provider: Some("iShares".into()),
            }),
        }
    }
}

fn cached_routes() -> EtfRoutes<CountingProvider> {
    EtfRoutes::new(
        CountingProvider::default(),
        ResponseCache::new(Duration::from_secs(60), Duration::from_secs(60), 100),
    )
}

fn period(p: &str) -> HistoryParams {
    HistoryParams {
        period: Some(p.to_owned()),
        ..Default::default()
    }
}

#[tokio::test]
async fn history_is_served_from_cache_on_repeat() {
    let routes = cached_routes();

    let first = routes.history(" voo ", &period("1M")).await.unwrap();
    let second = routes.history("VOO", &period("1M")).await.unwrap();
    let other_period = routes.history("VOO", &period("1Y")).await.unwrap();

    assert_eq!(first.prices.len(), 3);
    assert_eq!(first, second);
    assert_eq!(other_period.prices.len(), 3);
    assert_eq!(routes.provider().charts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_history_is_not_cached() {
    let routes = cached_routes();

    assert!(routes.history("EMPTY", &period("6M")).await.unwrap().prices.is_empty());
    assert!(routes.history("EMPTY", &period("6M")).await.unwrap().prices.is_empty());
    assert_eq!(routes.provider().charts.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn bad_history_params_are_bad_request() {
    let routes = cached_routes();

    let err = routes.history("VOO", &period("10Y")).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert!(err.message.contains("10Y"));

    let err = routes.history("   ", &period("1M")).await.unwrap_err();
    assert_eq!(err.status, StatusCode::BAD_REQUEST);
    assert_eq!(routes.provider().charts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn symbols_with_url_delimiters_are_bad_request() {
    let routes = cached_routes();

    for symbol in ["VOO#", "VOO?period1=0", "VOO/quote", "VO O"] {
        let err = routes.history(symbol, &period("1D")).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST, "{symbol}");
        let err = routes.details(symbol).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST, "{symbol}");
    }
    assert!(routes.history("^gspc", &period("1M")).await.is_ok());
    assert!(routes.history("brk-b", &period("1M")).await.is_ok());

    assert_eq!(routes.provider().charts.load(Ordering::SeqCst), 2);
    assert_eq!(routes.provider().details.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn history_body_matches_wire_shape() {
    let routes = cached_routes();
    let body = routes.history("VOO", &HistoryParams::default()).await.unwrap();

    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["prices"][0]["date"], "2024-06-14T00:00:00.000Z");
    assert_eq!(json["prices"][0]["close"], 100.0);
}

#[tokio::test]
async fn details_are_cached_per_symbol() {
    let routes = cached_routes();

    let first = routes.details("ivv").await.unwrap();
    let again = routes.details("IVV").await.unwrap();

    assert_eq!(first.symbol, "IVV");
    assert_eq!(first, again);
    assert_eq!(routes.provider().details.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn details_errors_map_to_statuses() {
    let routes = cached_routes();

    let not_found = routes.details("DEAD").await.unwrap_err();
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);

    let upstream = routes.details("FLAKY").await.unwrap_err();
    assert_eq!(upstream.status, StatusCode::BAD_GATEWAY);

    // Failures are not cached.
    routes.details("DEAD").await.unwrap_err();
    assert_eq!(routes.provider().details.load(Ordering::SeqCst), 3);
}

#[test]
fn route_error_serializes_message_only() {
    let err = RouteError::from(EtfError::Json(serde_json::from_str::<u8>("x").unwrap_err()));
    assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);

    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json.as_object().unwrap().len(), 1);
    assert!(json["message"].as_str().unwrap().starts_with("JSON deserialization error"));
}
