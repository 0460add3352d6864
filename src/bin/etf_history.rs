//! Binary to fetch a normalized price history (or fund details) from Yahoo
//! Finance and print the route's JSON body.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin etf_history --features cli -- VOO 5D
//! cargo run --bin etf_history --features cli -- VOO 2024-01-02 2024-03-01
//! cargo run --bin etf_history --features cli -- VOO details
//! ```
//!
//! Configuration is read from the environment (see [`etf_scout::config`]).

use std::env;
use std::process::ExitCode;

use etf_scout::routes::{EtfRoutes, HistoryParams, RouteError};
use etf_scout::{Config, ResponseCache, YahooClient};

#[tokio::main]
async fn main() -> etf_scout::error::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(symbol) = args.first() else {
        eprintln!("usage: etf_history <SYMBOL> [PERIOD | FROM TO | details]");
        return Ok(ExitCode::from(2));
    };

    let config = Config::from_env()?;
    let routes = EtfRoutes::new(YahooClient::from_config(&config)?, ResponseCache::disabled());

    let body = match args.get(1).map(String::as_str) {
        Some("details") => routes
            .details(symbol)
            .await
            .and_then(|d| to_json(&d)),
        _ => {
            let params = match (args.get(1), args.get(2)) {
                (Some(from), Some(to)) => HistoryParams {
                    from: Some(from.clone()),
                    to: Some(to.clone()),
                    ..Default::default()
                },
                (period, _) => HistoryParams {
                    period: period.cloned(),
                    ..Default::default()
                },
            };
            routes
                .history(symbol, &params)
                .await
                .and_then(|h| to_json(&h))
        }
    };

    match body {
        Ok(json) => {
            println!("{json}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("HTTP {}", err.status);
            println!("{}", serde_json::json!({ "message": err.message }));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn to_json<T: serde::Serialize>(body: &T) -> Result<String, RouteError> {
    serde_json::to_string_pretty(body).map_err(|e| RouteError::from(etf_scout::EtfError::Json(e)))
}
