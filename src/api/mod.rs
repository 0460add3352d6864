//! REST API endpoint implementations.
//!
//! Each sub-module adds high-level `async` methods to
//! [`YahooClient`](crate::client::YahooClient) via `impl` blocks. All methods
//! handle query encoding, HTTP transport, and error mapping automatically.
//!
//! ```no_run
//! use etf_scout::YahooClient;
//!
//! # #[tokio::main]
//! # async fn main() -> etf_scout::Result<()> {
//! let client = YahooClient::new()?;
//! let details = client.get_etf_details("VOO").await?;
//! println!("{} charges {:?}%", details.name, details.mer);
//! # Ok(())
//! # }
//! ```
//!
//! | Module | Endpoint | Description |
//! |---|---|---|
//! | [`chart`] | `/v8/finance/chart` | Candle history; also the [`QuoteSource`](crate::history::QuoteSource) impl |
//! | [`quote_summary`] | `/v10/finance/quoteSummary` | Fund metadata |

pub mod chart;
pub mod quote_summary;
