//! Framework-agnostic handlers for the ETF HTTP routes.
//!
//! | Route | Handler | Body |
//! |---|---|---|
//! | `GET /api/etfs/:symbol/history?period=&from=&to=` | [`EtfRoutes::history`] | [`HistoryResponse`] |
//! | `GET /api/etfs/:symbol` | [`EtfRoutes::details`] | [`EtfDetails`] |
//!
//! Handlers return either the typed body or a [`RouteError`] carrying the
//! HTTP status and a `{ "message": ... }` body; binding them to a server is
//! left to the embedding application.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::cache::ResponseCache;
use crate::client::YahooClient;
use crate::error::{EtfError, Result};
use crate::history::{HistoryRequest, QuoteSource, get_history};
use crate::types::etf::EtfDetails;
use crate::types::history::HistoryResponse;

/// Anything that can look up fund metadata for a symbol.
#[async_trait]
pub trait DetailsSource: Send + Sync {
    async fn etf_details(&self, symbol: &str) -> Result<EtfDetails>;
}

#[async_trait]
impl DetailsSource for YahooClient {
    async fn etf_details(&self, symbol: &str) -> Result<EtfDetails> {
        self.get_etf_details(symbol).await
    }
}

/// Raw query string of the history route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HistoryParams {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Error response of a route: status code plus `{ "message": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{status}: {message}")]
pub struct RouteError {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: String,
}

impl RouteError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<EtfError> for RouteError {
    fn from(err: EtfError) -> Self {
        let status = match &err {
            EtfError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            EtfError::Api(_) | EtfError::HttpStatus { .. } | EtfError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

/// Route handlers over a market-data provider and a response cache.
#[derive(Debug, Clone)]
pub struct EtfRoutes<P> {
    provider: P,
    cache: ResponseCache,
}

impl<P> EtfRoutes<P>
where
    P: QuoteSource + DetailsSource,
{
    pub fn new(provider: P, cache: ResponseCache) -> Self {
        Self { provider, cache }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `GET /api/etfs/:symbol/history`
    pub async fn history(&self, symbol: &str, params: &HistoryParams) -> std::result::Result<HistoryResponse, RouteError> {
        self.history_at(symbol, params, Utc::now()).await
    }

    /// History route evaluated against an explicit "now".
    pub async fn history_at(
        &self,
        symbol: &str,
        params: &HistoryParams,
        now: DateTime<Utc>,
    ) -> std::result::Result<HistoryResponse, RouteError> {
        let symbol = normalize_symbol(symbol)?;
        let request = HistoryRequest::from_params(
            params.period.as_deref(),
            params.from.as_deref(),
            params.to.as_deref(),
        )?;

        if let Some(prices) = self.cache.history(&symbol, &request).await {
            tracing::debug!(%symbol, ?request, "history cache hit");
            return Ok(HistoryResponse {
                prices: prices.as_ref().clone(),
            });
        }

        let prices = get_history(&self.provider, &symbol, &request, now).await;
        if !prices.is_empty() {
            self.cache
                .put_history(&symbol, &request, Arc::new(prices.clone()))
                .await;
        }

        Ok(HistoryResponse { prices })
    }

    /// `GET /api/etfs/:symbol`
    pub async fn details(&self, symbol: &str) -> std::result::Result<EtfDetails, RouteError> {
        let symbol = normalize_symbol(symbol)?;

        if let Some(details) = self.cache.details(&symbol).await {
            tracing::debug!(%symbol, "details cache hit");
            return Ok(details.as_ref().clone());
        }

        let details = self.provider.etf_details(&symbol).await.map_err(|e| {
            tracing::warn!(%symbol, error = %e, "details fetch failed");
            RouteError::from(e)
        })?;
        self.cache
            .put_details(&symbol, Arc::new(details.clone()))
            .await;

        Ok(details)
    }
}

/// Trim and upper-case a ticker; only `A-Z 0-9 . ^ = -` are accepted.
fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(EtfError::InvalidArgument("symbol must not be empty".to_owned()));
    }
    if let Some(c) = symbol
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '^' | '=' | '-')))
    {
        return Err(EtfError::InvalidArgument(format!(
            "symbol {symbol:?} contains invalid character {c:?}"
        )));
    }
    Ok(symbol)
}
