//! Price history types — chart wire format, validated candles and UI points.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiErrorBody;
use crate::types::enums::Interval;

// ---------------------------------------------------------------------------
// Chart query
// ---------------------------------------------------------------------------

/// What to ask the quote source for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartQuery {
    /// Candles from `start` up to `end` at the given sampling interval.
    Since {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: Interval,
    },
    /// Daily candles over an explicit calendar range (both at 00:00 UTC).
    Between { from: NaiveDate, to: NaiveDate },
}

impl ChartQuery {
    /// Sampling interval of this query.
    pub fn interval(&self) -> Interval {
        match self {
            Self::Since { interval, .. } => *interval,
            Self::Between { .. } => Interval::D1,
        }
    }

    /// Query window as unix seconds (`period1`, `period2`).
    pub fn window(&self) -> (i64, i64) {
        match self {
            Self::Since { start, end, .. } => (start.timestamp(), end.timestamp()),
            Self::Between { from, to } => (midnight_utc(*from), midnight_utc(*to)),
        }
    }
}

fn midnight_utc(date: NaiveDate) -> i64 {
    date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp()
}

// ---------------------------------------------------------------------------
// Candles & points
// ---------------------------------------------------------------------------

/// One validated provider sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCandle {
    pub timestamp: DateTime<Utc>,
    /// `None` when the provider reported a null or missing close.
    pub close: Option<f64>,
}

impl RawCandle {
    pub fn new(timestamp: DateTime<Utc>, close: Option<f64>) -> Self {
        Self { timestamp, close }
    }
}

/// Sort candles by time, one candle per timestamp.
///
/// When the provider repeats a timestamp the later sample replaces the
/// earlier one.
pub fn chronological(candles: impl IntoIterator<Item = RawCandle>) -> Vec<RawCandle> {
    let mut by_time = BTreeMap::new();
    for candle in candles {
        by_time.insert(candle.timestamp, candle);
    }
    by_time.into_values().collect()
}

/// One point of a UI-ready price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(with = "iso_millis")]
    pub date: DateTime<Utc>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: DateTime<Utc>, close: f64) -> Self {
        Self { date, close }
    }
}

/// Body of `GET /api/etfs/:symbol/history`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub prices: Vec<PricePoint>,
}

/// ISO-8601 timestamps with millisecond precision and a `Z` suffix, the
/// format browsers produce with `Date.toISOString()`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|d| d.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Chart wire format
// ---------------------------------------------------------------------------

/// Response of `GET /v8/finance/chart/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartResponse {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// One symbol's chart data. `timestamp` and each quote array are parallel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartResult {
    /// Epoch seconds. Absent when the window contains no candles.
    #[serde(default)]
    pub timestamp: Vec<Option<i64>>,
    #[serde(default)]
    pub indicators: Indicators,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteIndicator>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuoteIndicator {
    #[serde(default)]
    pub close: Vec<Option<f64>>,
}

impl ChartResult {
    /// Pair timestamps with closes, in chronological order.
    ///
    /// Samples without a usable timestamp are dropped; a missing or
    /// non-finite close becomes `None`. Duplicate timestamps collapse to
    /// the last sample reported.
    pub fn into_candles(self) -> Vec<RawCandle> {
        let closes = self
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        chronological(self.timestamp.into_iter().enumerate().filter_map(|(i, ts)| {
            let timestamp = DateTime::from_timestamp(ts?, 0)?;
            let close = closes.get(i).copied().flatten().filter(|c| c.is_finite());
            Some(RawCandle::new(timestamp, close))
        }))
    }
}
