//! Chart endpoint — raw candle history for one symbol.

use async_trait::async_trait;

use crate::client::YahooClient;
use crate::constants::CHART_PATH;
use crate::error::{EtfError, Result};
use crate::history::QuoteSource;
use crate::types::history::*;

impl YahooClient {
    /// Retrieve the raw chart payload for a symbol.
    ///
    /// Regular-hours candles only (`includePrePost=false`).
    ///
    /// **Endpoint:** `GET /v8/finance/chart/{symbol}`
    pub async fn get_chart(&self, symbol: &str, query: &ChartQuery) -> Result<ChartResponse> {
        let (period1, period2) = query.window();
        let params = [
            ("period1", period1.to_string()),
            ("period2", period2.to_string()),
            ("interval", query.interval().as_str().to_owned()),
            ("includePrePost", "false".to_owned()),
        ];
        self.get(CHART_PATH, symbol, &params).await
    }

    /// Retrieve candles for a symbol, validated into [`RawCandle`]s.
    ///
    /// A window without trades yields an empty list rather than an error.
    pub async fn get_candles(&self, symbol: &str, query: &ChartQuery) -> Result<Vec<RawCandle>> {
        let resp = self.get_chart(symbol, query).await?;
        if let Some(err) = resp.chart.error {
            return Err(EtfError::Api(err));
        }
        Ok(resp
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(ChartResult::into_candles)
            .unwrap_or_default())
    }
}

#[async_trait]
impl QuoteSource for YahooClient {
    async fn chart(&self, symbol: &str, query: &ChartQuery) -> Result<Vec<RawCandle>> {
        self.get_candles(symbol, query).await
    }
}
