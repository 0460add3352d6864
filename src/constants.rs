//! Constants for the Yahoo Finance API and the history normalizer.
//!
//! Contains base URLs, endpoint paths, session-detection thresholds and
//! cache defaults. These are used internally by
//! [`YahooClient`](crate::client::YahooClient) and the
//! [`history`](crate::history) pipeline, but are also exported for advanced
//! usage.

use chrono::TimeDelta;

// ---------------------------------------------------------------------------
// Base URLs
// ---------------------------------------------------------------------------

/// Base URL for the Yahoo Finance query API.
pub const API_BASE_URL: &str = "https://query1.finance.yahoo.com";

// ---------------------------------------------------------------------------
// Endpoint paths
// ---------------------------------------------------------------------------

/// Chart (candle history) endpoint prefix; the symbol is appended.
pub const CHART_PATH: &str = "/v8/finance/chart";

/// Quote summary (fund metadata) endpoint prefix; the symbol is appended.
pub const QUOTE_SUMMARY_PATH: &str = "/v10/finance/quoteSummary";

/// Modules requested from the quote summary endpoint.
pub const QUOTE_SUMMARY_MODULES: &str = "price,assetProfile,summaryProfile,fundProfile";

/// Yahoo rejects requests without a browser-like user agent.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

// ---------------------------------------------------------------------------
// History normalization
// ---------------------------------------------------------------------------

/// Two consecutive intraday points further apart than this belong to
/// different trading sessions.
pub const SESSION_GAP: TimeDelta = TimeDelta::hours(2);

/// Maximum number of queries issued for the `1D` period when the market was
/// closed on the most recent calendar days.
pub const ONE_DAY_MAX_ATTEMPTS: u32 = 5;

// ---------------------------------------------------------------------------
// Cache & transport defaults
// ---------------------------------------------------------------------------

/// Default time-to-live of cached responses, in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Default time-to-live of cached price histories, in seconds.
pub const DEFAULT_HISTORY_CACHE_TTL_SECS: u64 = 300;

/// Default maximum number of entries per cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Default HTTP request timeout, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
