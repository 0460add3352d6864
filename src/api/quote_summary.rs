//! Quote Summary endpoint — fund metadata.

use crate::client::YahooClient;
use crate::constants::{QUOTE_SUMMARY_MODULES, QUOTE_SUMMARY_PATH};
use crate::error::{EtfError, Result};
use crate::types::etf::*;

impl YahooClient {
    /// Retrieve name, description, expense ratio, listing and latest price
    /// for a fund.
    ///
    /// Sends the configured crumb when one is set.
    ///
    /// **Endpoint:** `GET /v10/finance/quoteSummary/{symbol}`
    pub async fn get_etf_details(&self, symbol: &str) -> Result<EtfDetails> {
        let mut params = vec![("modules", QUOTE_SUMMARY_MODULES.to_owned())];
        if let Some(crumb) = self.crumb() {
            params.push(("crumb", crumb.to_owned()));
        }

        let resp: QuoteSummaryResponse = self.get(QUOTE_SUMMARY_PATH, symbol, &params).await?;
        if let Some(err) = resp.quote_summary.error {
            return Err(EtfError::Api(err));
        }

        resp.quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.into_details(symbol))
            .ok_or_else(|| EtfError::NoData(format!("no quote summary for {symbol}")))
    }
}
