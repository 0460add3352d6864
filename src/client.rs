//! Core HTTP client for the Yahoo Finance query API.
//!
//! The [`YahooClient`] struct is the main entry point for talking to Yahoo.
//! It wraps [`reqwest::Client`] with the headers Yahoo expects and provides a
//! typed `get` method that builds the query string, sends the request and
//! maps error bodies onto [`EtfError`].
//!
//! Endpoint methods are added to `YahooClient` via `impl` blocks in the
//! [`crate::api`] module.

use std::time::Duration;

use reqwest::header::{self, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::Config;
use crate::constants::{API_BASE_URL, DEFAULT_HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{ApiErrorBody, EtfError, Result};

/// Core HTTP client for the Yahoo Finance query API.
///
/// Cloning is cheap: the underlying connection pool is shared.
///
/// # Example
///
/// ```no_run
/// use etf_scout::client::YahooClient;
///
/// # #[tokio::main]
/// # async fn main() -> etf_scout::error::Result<()> {
/// let client = YahooClient::new()?;
/// // client.get::<MyResponse>("/v8/finance/chart", "SPY", &[]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct YahooClient {
    http: reqwest::Client,
    /// Base URL for REST requests (defaults to [`API_BASE_URL`]).
    base_url: String,
    /// Session crumb, required by the quote summary endpoint.
    crumb: Option<String>,
}

impl YahooClient {
    /// Create a client pointing at the public Yahoo Finance API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client pointing at a custom base URL.
    ///
    /// Useful for testing against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::build(
            base_url.into(),
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            None,
        )
    }

    /// Create a client from a loaded [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(
            config.base_url.clone(),
            config.http_timeout,
            config.crumb.clone(),
        )
    }

    fn build(base_url: String, timeout: Duration, crumb: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            crumb,
        })
    }

    /// Returns the session crumb, if one is configured.
    pub fn crumb(&self) -> Option<&str> {
        self.crumb.as_deref()
    }

    // -----------------------------------------------------------------------
    // Generic HTTP helpers
    // -----------------------------------------------------------------------

    /// Perform a GET request for one symbol's resource under `path` and
    /// deserialize the JSON response.
    ///
    /// The symbol is percent-encoded as a single path segment.
    pub async fn get<R: DeserializeOwned>(
        &self,
        path: &str,
        symbol: &str,
        query: &[(&str, String)],
    ) -> Result<R> {
        let url = self.url(path, symbol, query)?;
        tracing::debug!(%url, "GET");

        let resp = self.http.get(url).send().await?;

        self.handle_response(resp).await
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Build the full URL from an endpoint path, a symbol segment and query
    /// pairs.
    fn url(&self, path: &str, symbol: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        let mut url = Url::parse(&raw)?;
        url.path_segments_mut()
            .map_err(|()| EtfError::InvalidArgument(format!("base URL cannot take a path: {raw}")))?
            .pop_if_empty()
            .push(symbol);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Default headers applied to every request.
    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
        headers
    }

    /// Read a response, returning either the deserialized body or an
    /// `EtfError`.
    async fn handle_response<R: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<R> {
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(EtfError::Json)
        } else {
            let body = String::from_utf8_lossy(&bytes);
            Err(parse_error_body(status, &body))
        }
    }
}

/// Try to find Yahoo's error object in a response body; fall back to a raw
/// HTTP status error.
///
/// Yahoo wraps errors in an envelope named after the endpoint
/// (`{"chart": {"result": null, "error": {...}}}`), so every top-level
/// object is inspected for a non-null `error` member.
pub(crate) fn parse_error_body(status: reqwest::StatusCode, body: &str) -> EtfError {
    if let Some(api_err) = find_error_object(body) {
        return EtfError::Api(api_err);
    }
    EtfError::HttpStatus {
        status,
        body: body.to_owned(),
    }
}

/// Extract the first non-empty error object from a Yahoo envelope.
pub(crate) fn find_error_object(body: &str) -> Option<ApiErrorBody> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .as_object()?
        .values()
        .filter_map(|envelope| envelope.get("error"))
        .filter(|err| !err.is_null())
        .filter_map(|err| serde_json::from_value::<ApiErrorBody>(err.clone()).ok())
        .find(|err| err.code.is_some() || err.description.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_object_found_in_any_envelope() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_error_body(reqwest::StatusCode::NOT_FOUND, body);
        match err {
            EtfError::Api(api) => {
                assert!(api.is_not_found());
                assert_eq!(
                    api.description.as_deref(),
                    Some("No data found, symbol may be delisted")
                );
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let err = parse_error_body(reqwest::StatusCode::TOO_MANY_REQUESTS, "Too Many Requests");
        assert!(matches!(
            err,
            EtfError::HttpStatus { status, .. } if status == reqwest::StatusCode::TOO_MANY_REQUESTS
        ));
    }

    #[test]
    fn url_appends_symbol_and_query_pairs() {
        let client = YahooClient::with_base_url("https://example.test/").unwrap();
        let url = client
            .url("/v8/finance/chart", "SPY", &[("interval", "1d".to_owned())])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.test/v8/finance/chart/SPY?interval=1d");
    }

    #[test]
    fn symbol_cannot_escape_its_path_segment() {
        let client = YahooClient::with_base_url("https://example.test").unwrap();
        let query = [("interval", "5m".to_owned())];

        let url = client.url("/v8/finance/chart", "VOO#x", &query).unwrap();
        assert_eq!(url.as_str(), "https://example.test/v8/finance/chart/VOO%23x?interval=5m");
        assert_eq!(url.fragment(), None);

        let url = client.url("/v8/finance/chart", "VOO?a=1/b", &query).unwrap();
        assert_eq!(url.path(), "/v8/finance/chart/VOO%3Fa=1%2Fb");
        assert_eq!(url.query(), Some("interval=5m"));
    }
}
