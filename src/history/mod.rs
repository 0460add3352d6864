//! Price-history normalization.
//!
//! Turns a requested display horizon into a clean, UI-ready series of
//! [`PricePoint`]s:
//!
//! 1. [`period`] — resolve the horizon into a start instant and interval.
//! 2. [`QuoteSource::chart`] — fetch raw candles (the only I/O).
//! 3. [`clean`] — map candles to points and drop a provisional zero tail.
//! 4. [`session`] — for intraday horizons, keep the N most recent sessions.
//!
//! Provider failures never escape [`get_history`]: they are logged and turn
//! into an empty series so the UI degrades to an empty chart.
//!
//! ```no_run
//! use chrono::Utc;
//! use etf_scout::history::{get_history, HistoryRequest};
//! use etf_scout::types::Period;
//! use etf_scout::YahooClient;
//!
//! # #[tokio::main]
//! # async fn main() -> etf_scout::Result<()> {
//! let client = YahooClient::new()?;
//! let prices = get_history(&client, "VOO", &HistoryRequest::Period(Period::FiveDays), Utc::now()).await;
//! println!("{} points", prices.len());
//! # Ok(())
//! # }
//! ```

pub mod clean;
pub mod period;
pub mod session;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::constants::ONE_DAY_MAX_ATTEMPTS;
use crate::error::{EtfError, Result};
use crate::types::enums::Period;
use crate::types::history::{ChartQuery, PricePoint, RawCandle};

pub use clean::clean_candles;
pub use period::{Lookback, PeriodSpec, ResolvedPeriod};
pub use session::{last_sessions, split_sessions};

// ---------------------------------------------------------------------------
// Quote source
// ---------------------------------------------------------------------------

/// Anything that can answer a chart query with validated candles.
///
/// Implemented by [`YahooClient`](crate::client::YahooClient); tests plug in
/// in-memory fakes.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn chart(&self, symbol: &str, query: &ChartQuery) -> Result<Vec<RawCandle>>;
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Validated history request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryRequest {
    /// A symbolic horizon relative to now.
    Period(Period),
    /// An explicit calendar range, sampled daily.
    Range { from: NaiveDate, to: NaiveDate },
}

impl Default for HistoryRequest {
    fn default() -> Self {
        Self::Period(Period::default())
    }
}

impl HistoryRequest {
    /// Validate raw query-string parameters.
    ///
    /// A non-empty `from`/`to` pair wins over `period`. Without a pair,
    /// `period` is parsed (default `1M`); `"custom"` is only meaningful with
    /// dates and is rejected on its own.
    pub fn from_params(period: Option<&str>, from: Option<&str>, to: Option<&str>) -> Result<Self> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let (Some(from), Some(to)) = (present(from), present(to)) {
            let from = parse_date("from", from)?;
            let to = parse_date("to", to)?;
            if from > to {
                return Err(EtfError::InvalidArgument(format!(
                    "from ({from}) is after to ({to})"
                )));
            }
            return Ok(Self::Range { from, to });
        }

        match present(period) {
            None => Ok(Self::default()),
            Some(p) if p.eq_ignore_ascii_case("custom") => Err(EtfError::InvalidArgument(
                "custom period requires both from and to".to_owned(),
            )),
            Some(p) => Ok(Self::Period(p.parse()?)),
        }
    }
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp; the latter is
/// truncated to its UTC calendar date.
fn parse_date(name: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|d| d.with_timezone(&Utc).date_naive()))
        .map_err(|_| EtfError::InvalidArgument(format!("{name} is not a date: {raw:?}")))
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Fetch and normalize the price history of `symbol`.
///
/// - `Range`: one daily query, cleaned, no segmentation.
/// - `Period`: resolved against `now`, cleaned, and cut to the most recent
///   sessions for intraday periods. `1D` widens its window by one calendar
///   day and retries while the result is empty, up to
///   [`ONE_DAY_MAX_ATTEMPTS`] queries.
///
/// Returns an empty series when the provider fails.
pub async fn get_history<S>(source: &S, symbol: &str, request: &HistoryRequest, now: DateTime<Utc>) -> Vec<PricePoint>
where
    S: QuoteSource + ?Sized,
{
    let result = match *request {
        HistoryRequest::Range { from, to } => fetch_range(source, symbol, from, to).await,
        HistoryRequest::Period(period) => fetch_period(source, symbol, period, now).await,
    };

    result.unwrap_or_else(|e| {
        tracing::warn!(symbol, ?request, error = %e, "history fetch failed");
        Vec::new()
    })
}

async fn fetch_range<S>(source: &S, symbol: &str, from: NaiveDate, to: NaiveDate) -> Result<Vec<PricePoint>>
where
    S: QuoteSource + ?Sized,
{
    let candles = source.chart(symbol, &ChartQuery::Between { from, to }).await?;
    Ok(clean_candles(&candles))
}

async fn fetch_period<S>(source: &S, symbol: &str, period: Period, now: DateTime<Utc>) -> Result<Vec<PricePoint>>
where
    S: QuoteSource + ?Sized,
{
    let resolved = period.resolve(now);
    let attempts = if period == Period::OneDay {
        ONE_DAY_MAX_ATTEMPTS
    } else {
        1
    };

    let mut points = Vec::new();
    for attempt in 0..attempts {
        let query = resolved.widened(attempt).chart_query(now);
        let candles = source.chart(symbol, &query).await?;

        points = clean_candles(&candles);
        if let Some(count) = resolved.sessions {
            points = last_sessions(&points, count);
        }
        if !points.is_empty() {
            break;
        }
        tracing::debug!(symbol, %period, attempt, "no candles in window");
    }

    tracing::info!(symbol, %period, points = points.len(), "history normalized");
    Ok(points)
}
