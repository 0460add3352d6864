//! Environment-driven configuration.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `YAHOO_BASE_URL` | [`API_BASE_URL`] | Provider base URL |
//! | `YAHOO_CRUMB` | unset | Session crumb for quote summary calls |
//! | `SEARCH_CACHE_TTL_SECONDS` | 3600 | Fund details cache time-to-live |
//! | `HISTORY_CACHE_TTL_SECONDS` | 300 | Price history cache time-to-live |
//! | `CACHE_MAX_CAPACITY` | 10000 | Entries per cache |
//! | `HTTP_TIMEOUT_SECONDS` | 30 | Per-request timeout |

use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    API_BASE_URL, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL_SECS, DEFAULT_HISTORY_CACHE_TTL_SECS,
    DEFAULT_HTTP_TIMEOUT_SECS,
};
use crate::error::{EtfError, Result};

/// Runtime configuration shared by the client and the caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub crumb: Option<String>,
    pub cache_ttl: Duration,
    pub history_cache_ttl: Duration,
    pub cache_capacity: u64,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_owned(),
            crumb: None,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            history_cache_ttl: Duration::from_secs(DEFAULT_HISTORY_CACHE_TTL_SECS),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            base_url: get("YAHOO_BASE_URL").unwrap_or(defaults.base_url),
            crumb: get("YAHOO_CRUMB"),
            cache_ttl: match get("SEARCH_CACHE_TTL_SECONDS") {
                Some(raw) => Duration::from_secs(parse_number("SEARCH_CACHE_TTL_SECONDS", &raw)?),
                None => defaults.cache_ttl,
            },
            history_cache_ttl: match get("HISTORY_CACHE_TTL_SECONDS") {
                Some(raw) => Duration::from_secs(parse_number("HISTORY_CACHE_TTL_SECONDS", &raw)?),
                None => defaults.history_cache_ttl,
            },
            cache_capacity: match get("CACHE_MAX_CAPACITY") {
                Some(raw) => parse_number("CACHE_MAX_CAPACITY", &raw)?,
                None => defaults.cache_capacity,
            },
            http_timeout: match get("HTTP_TIMEOUT_SECONDS") {
                Some(raw) => Duration::from_secs(parse_number("HTTP_TIMEOUT_SECONDS", &raw)?),
                None => defaults.http_timeout,
            },
        })
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| EtfError::Config(format!("{key} must be a non-negative integer, got {raw:?}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::from_lookup(lookup(&[
            ("YAHOO_BASE_URL", "http://localhost:9000"),
            ("YAHOO_CRUMB", "abc"),
            ("SEARCH_CACHE_TTL_SECONDS", "60"),
            ("HISTORY_CACHE_TTL_SECONDS", "0"),
            ("CACHE_MAX_CAPACITY", "5"),
            ("HTTP_TIMEOUT_SECONDS", " 2 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.crumb.as_deref(), Some("abc"));
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.history_cache_ttl, Duration::ZERO);
        assert_eq!(config.cache_capacity, 5);
        assert_eq!(config.http_timeout, Duration::from_secs(2));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("YAHOO_CRUMB", ""), ("SEARCH_CACHE_TTL_SECONDS", " ")]))
            .unwrap();
        assert_eq!(config.crumb, None);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn malformed_number_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("SEARCH_CACHE_TTL_SECONDS", "soon")])).unwrap_err();
        assert!(matches!(err, EtfError::Config(msg) if msg.contains("SEARCH_CACHE_TTL_SECONDS")));
    }
}
