#![allow(missing_docs)]
//! Fund metadata — quote summary wire format and the UI-facing details.

use serde::{Deserialize, Serialize};

use crate::error::ApiErrorBody;

// ---------------------------------------------------------------------------
// ETF Details
// ---------------------------------------------------------------------------

/// Provider-derived fund metadata shown next to the price chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtfDetails {
    pub symbol: String,
    pub name: String,
    pub description: String,
    /// Management expense ratio as a percentage (`0.03` means 0.03%).
    pub mer: Option<f64>,
    pub exchange: Option<String>,
    pub currency: Option<String>,
    pub current_price: Option<f64>,
    pub product_url: Option<String>,
    /// Fund family (e.g. "Vanguard").
    pub provider: Option<String>,
}

// ---------------------------------------------------------------------------
// Quote Summary wire format
// ---------------------------------------------------------------------------

/// Response of `GET /v10/finance/quoteSummary/{symbol}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResponse {
    pub quote_summary: QuoteSummaryEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryEnvelope {
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    #[serde(default)]
    pub price: Option<PriceModule>,
    #[serde(default)]
    pub asset_profile: Option<ProfileModule>,
    #[serde(default)]
    pub summary_profile: Option<ProfileModule>,
    #[serde(default)]
    pub fund_profile: Option<FundProfileModule>,
}

/// Yahoo formatted number: `{"raw": 0.0003, "fmt": "0.03%"}` or `{}`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawValue {
    #[serde(default)]
    pub raw: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange_name: Option<String>,
    #[serde(default)]
    pub regular_market_price: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileModule {
    #[serde(default)]
    pub long_business_summary: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundProfileModule {
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub fees_expenses_investment: Option<FeesModule>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeesModule {
    #[serde(default)]
    pub annual_report_expense_ratio: Option<RawValue>,
    #[serde(default)]
    pub net_exp_ratio: Option<RawValue>,
}

impl QuoteSummaryResult {
    /// Flatten the modules into [`EtfDetails`].
    ///
    /// Yahoo reports the expense ratio as a fraction; it is converted to a
    /// percentage rounded to four decimals.
    pub fn into_details(self, symbol: &str) -> EtfDetails {
        let price = self.price.unwrap_or_default();
        let asset = self.asset_profile.unwrap_or_default();
        let summary = self.summary_profile.unwrap_or_default();
        let fund = self.fund_profile.unwrap_or_default();

        let mer = fund.fees_expenses_investment.and_then(|fees| {
            fees.annual_report_expense_ratio
                .and_then(|v| v.raw)
                .or_else(|| fees.net_exp_ratio.and_then(|v| v.raw))
        });

        EtfDetails {
            symbol: price.symbol.unwrap_or_else(|| symbol.to_owned()),
            name: price
                .long_name
                .or(price.short_name)
                .unwrap_or_else(|| symbol.to_owned()),
            description: asset
                .long_business_summary
                .or(summary.long_business_summary)
                .unwrap_or_default(),
            mer: mer.map(|fraction| (fraction * 100.0 * 10_000.0).round() / 10_000.0),
            exchange: price.exchange_name,
            currency: price.currency,
            current_price: price.regular_market_price.and_then(|v| v.raw),
            product_url: asset.website.or(summary.website),
            provider: fund.family,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expense_ratio_becomes_percentage() {
        let result: QuoteSummaryResult = serde_json::from_str(
            r#"{
                "price": {"symbol": "VOO", "longName": "Vanguard S&P 500 ETF", "currency": "USD",
                          "exchangeName": "NYSEArca", "regularMarketPrice": {"raw": 512.3, "fmt": "512.30"}},
                "fundProfile": {"family": "Vanguard",
                                "feesExpensesInvestment": {"annualReportExpenseRatio": {"raw": 0.0003, "fmt": "0.03%"}}}
            }"#,
        )
        .unwrap();
        let details = result.into_details("VOO");
        assert_eq!(details.mer, Some(0.03));
        assert_eq!(details.provider.as_deref(), Some("Vanguard"));
        assert_eq!(details.current_price, Some(512.3));
        assert_eq!(details.description, "");
    }

    #[test]
    fn missing_modules_fall_back_to_symbol() {
        let details = QuoteSummaryResult::default().into_details("XLK");
        assert_eq!(details.symbol, "XLK");
        assert_eq!(details.name, "XLK");
        assert_eq!(details.mer, None);
    }
}
