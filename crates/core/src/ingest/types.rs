use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    pub quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(default)]
    pub result: Option<Vec<QuoteItem>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub symbol: Option<String>,
    pub long_name: Option<String>,
    pub regular_market_price: Option<f64>,
    pub fifty_two_week_high: Option<f64>,
    pub fifty_two_week_low: Option<f64>,
    pub price_eps_current_year: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingEnvelope {
    pub finance: Option<TrendingFinance>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingFinance {
    #[serde(default)]
    pub result: Option<Vec<TrendingResult>>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingResult {
    #[serde(default)]
    pub quotes: Option<Vec<TrendingQuote>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingQuote {
    pub symbol: Option<String>,
}

/// One symbol's entry of the spark response, keyed by symbol at the top level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparkItem {
    pub symbol: Option<String>,
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    #[serde(default)]
    pub close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl ApiErrorBody {
    pub fn summary(&self) -> String {
        match (self.code.as_deref(), self.description.as_deref()) {
            (Some(code), Some(desc)) => format!("{code}: {desc}"),
            (None, Some(desc)) => desc.to_string(),
            (Some(code), None) => code.to_string(),
            (None, None) => "unspecified API error".to_string(),
        }
    }
}
