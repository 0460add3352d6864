//! Period resolution — symbolic horizon to provider query parameters.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};

use crate::types::enums::{Interval, Period};
use crate::types::history::ChartQuery;

/// How far back a period reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// A fixed number of calendar days before now.
    Days(i64),
    /// January 1 of the current UTC year.
    YearStart,
    /// 1970-01-01.
    Epoch,
}

/// Fixed configuration of one [`Period`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodSpec {
    pub lookback: Lookback,
    pub interval: Interval,
    /// Trading sessions to keep; only intraday periods carry one.
    pub sessions: Option<usize>,
}

/// A period pinned to a concrete start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub start: DateTime<Utc>,
    pub interval: Interval,
    pub sessions: Option<usize>,
}

impl Period {
    /// Lookback window, interval and session count of this period.
    pub fn spec(self) -> PeriodSpec {
        let (lookback, interval, sessions) = match self {
            Self::OneDay => (Lookback::Days(7), Interval::I5m, Some(1)),
            Self::FiveDays => (Lookback::Days(10), Interval::I15m, Some(5)),
            Self::OneMonth => (Lookback::Days(35), Interval::D1, None),
            Self::SixMonths => (Lookback::Days(190), Interval::D1, None),
            Self::YearToDate => (Lookback::YearStart, Interval::D1, None),
            Self::OneYear => (Lookback::Days(370), Interval::D1, None),
            Self::FiveYears => (Lookback::Days(1830), Interval::W1, None),
            Self::Max => (Lookback::Epoch, Interval::M1, None),
        };
        PeriodSpec {
            lookback,
            interval,
            sessions,
        }
    }

    /// Pin this period to a start instant relative to `now`.
    pub fn resolve(self, now: DateTime<Utc>) -> ResolvedPeriod {
        let spec = self.spec();
        let start = match spec.lookback {
            Lookback::Days(days) => now - TimeDelta::days(days),
            Lookback::YearStart => Utc
                .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
                .single()
                .unwrap_or(DateTime::UNIX_EPOCH),
            Lookback::Epoch => DateTime::UNIX_EPOCH,
        };
        ResolvedPeriod {
            start,
            interval: spec.interval,
            sessions: spec.sessions,
        }
    }
}

impl ResolvedPeriod {
    /// Move the start back by `days` additional calendar days.
    pub fn widened(self, days: u32) -> Self {
        Self {
            start: self.start - TimeDelta::days(i64::from(days)),
            ..self
        }
    }

    /// Chart query covering `start..now`.
    pub fn chart_query(&self, now: DateTime<Utc>) -> ChartQuery {
        ChartQuery::Since {
            start: self.start,
            end: now,
            interval: self.interval,
        }
    }
}
