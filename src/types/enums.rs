//! Shared enum types that map directly to wire string values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EtfError;

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// Display horizon selected in the UI.
///
/// A custom date range is not a variant: it is expressed as
/// [`HistoryRequest::Range`](crate::history::HistoryRequest::Range), so every
/// `Period` resolves to a provider query without a failure path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    /// Most recent trading session, 5-minute candles.
    #[serde(rename = "1D")]
    OneDay,
    /// Five most recent trading sessions, 15-minute candles.
    #[serde(rename = "5D")]
    FiveDays,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    /// Since January 1 of the current year.
    #[serde(rename = "YTD")]
    YearToDate,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
    /// Everything the provider has, monthly candles.
    #[serde(rename = "MAX")]
    Max,
}

impl Period {
    /// Every symbolic period, shortest first.
    pub const ALL: [Period; 8] = [
        Self::OneDay,
        Self::FiveDays,
        Self::OneMonth,
        Self::SixMonths,
        Self::YearToDate,
        Self::OneYear,
        Self::FiveYears,
        Self::Max,
    ];

    /// Wire representation (`"1D"`, `"YTD"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::FiveDays => "5D",
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::YearToDate => "YTD",
            Self::OneYear => "1Y",
            Self::FiveYears => "5Y",
            Self::Max => "MAX",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = EtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EtfError::InvalidArgument(format!("unknown period: {s:?}")))
    }
}

// ---------------------------------------------------------------------------
// Interval
// ---------------------------------------------------------------------------

/// Candle sampling interval accepted by the chart endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    I1m,
    I2m,
    I5m,
    I15m,
    I30m,
    I60m,
    I90m,
    I1h,
    D1,
    D5,
    W1,
    M1,
    M3,
}

impl Interval {
    /// Query-string representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::I1m => "1m",
            Self::I2m => "2m",
            Self::I5m => "5m",
            Self::I15m => "15m",
            Self::I30m => "30m",
            Self::I60m => "60m",
            Self::I90m => "90m",
            Self::I1h => "1h",
            Self::D1 => "1d",
            Self::D5 => "5d",
            Self::W1 => "1wk",
            Self::M1 => "1mo",
            Self::M3 => "3mo",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
