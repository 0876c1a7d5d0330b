use crate::domain::quote::{compute_target_mean_price, QuoteRecord};
use crate::domain::spark::{SparkPoint, SparkSeries};
use crate::domain::trending::{TrendingEntry, TOP_N};
use crate::error::PipelineError;
use crate::ingest::types::{
    QuoteEnvelope, QuoteItem, SparkItem, TrendingEnvelope, TrendingFinance,
};
use crate::time::epoch::from_epoch_seconds;
use serde_json::Value;

pub fn quote_from_json(raw: &Value) -> Result<QuoteRecord, PipelineError> {
    let envelope = serde_json::from_value::<QuoteEnvelope>(raw.clone())
        .map_err(|e| PipelineError::no_data(format!("unexpected quote response shape: {e}")))?;

    let response = envelope
        .quote_response
        .ok_or_else(|| PipelineError::no_data("quoteResponse is missing"))?;
    if let Some(err) = response.error.as_ref() {
        tracing::debug!(error = %err.summary(), "quote response carries an API error");
    }

    let first = response
        .result
        .and_then(|items| items.into_iter().next())
        .ok_or_else(|| PipelineError::no_data("quoteResponse.result is empty"))?;

    first.validate_and_into_record()
}

impl QuoteItem {
    pub fn validate_and_into_record(self) -> Result<QuoteRecord, PipelineError> {
        let ticker = self
            .symbol
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PipelineError::no_data("quote has no symbol"))?;

        let current_price = required(self.regular_market_price, "regularMarketPrice")?;
        let fifty_two_week_high = required(self.fifty_two_week_high, "fiftyTwoWeekHigh")?;
        let fifty_two_week_low = required(self.fifty_two_week_low, "fiftyTwoWeekLow")?;

        let target_mean_price = match compute_target_mean_price(
            self.price_eps_current_year,
            self.forward_pe,
            current_price,
        ) {
            Ok(v) => Some(v),
            Err(err) => {
                tracing::warn!(%ticker, error = %err, "target mean price omitted");
                None
            }
        };

        let company_name = self
            .long_name
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(QuoteRecord {
            ticker,
            company_name,
            current_price,
            fifty_two_week_high,
            fifty_two_week_low,
            price_eps_current_year: self.price_eps_current_year,
            forward_pe: self.forward_pe,
            target_mean_price,
        })
    }
}

fn required(value: Option<f64>, field: &str) -> Result<f64, PipelineError> {
    value.ok_or_else(|| PipelineError::no_data(format!("quote field {field} is missing")))
}

pub fn trending_from_json(raw: &Value, region: &str) -> Result<TrendingEntry, PipelineError> {
    let envelope = serde_json::from_value::<TrendingEnvelope>(raw.clone()).map_err(|e| {
        PipelineError::no_data(format!("unexpected trending response shape: {e}"))
    })?;

    let finance = envelope
        .finance
        .ok_or_else(|| PipelineError::no_data("finance is missing"))?;
    let TrendingFinance { result, error } = finance;

    let quotes = result
        .and_then(|r| r.into_iter().next())
        .and_then(|r| r.quotes)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| match error {
            Some(err) => PipelineError::no_data(format!(
                "no trending quotes for {region}: {}",
                err.summary()
            )),
            None => PipelineError::no_data(format!("no trending quotes for {region}")),
        })?;

    // Entries without a symbol are skipped before the top-N cut.
    let symbols: Vec<String> = quotes
        .into_iter()
        .filter_map(|q| q.symbol)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .take(TOP_N)
        .collect();

    if symbols.is_empty() {
        return Err(PipelineError::no_data(format!(
            "trending quotes for {region} carry no symbols"
        )));
    }

    Ok(TrendingEntry {
        region: region.to_string(),
        symbols,
    })
}

pub fn spark_from_json(raw: &Value, symbol: &str) -> Result<SparkSeries, PipelineError> {
    let entry = raw
        .get(symbol)
        .filter(|v| !v.is_null())
        .ok_or_else(|| PipelineError::no_data(format!("spark response has no entry for {symbol}")))?;

    let item = serde_json::from_value::<SparkItem>(entry.clone())
        .map_err(|e| PipelineError::no_data(format!("unexpected spark entry shape: {e}")))?;

    let closes = item
        .close
        .filter(|c| !c.is_empty())
        .ok_or_else(|| PipelineError::no_data(format!("no close series for {symbol}")))?;
    let timestamps = item.timestamp.unwrap_or_default();

    if timestamps.len() != closes.len() {
        return Err(PipelineError::no_data(format!(
            "spark series length mismatch for {symbol}: {} timestamps, {} closes",
            timestamps.len(),
            closes.len()
        )));
    }

    let mut points = Vec::with_capacity(closes.len());
    for (secs, close) in timestamps.into_iter().zip(closes) {
        // Non-trading gaps come back as null closes.
        let Some(close_price) = close else {
            continue;
        };
        points.push(SparkPoint {
            timestamp: from_epoch_seconds(secs)?,
            close_price,
        });
    }

    if points.is_empty() {
        return Err(PipelineError::no_data(format!(
            "close series for {symbol} has no values"
        )));
    }

    points.sort_by_key(|p| p.timestamp);

    Ok(SparkSeries {
        symbol: symbol.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apple_quote() -> Value {
        json!({
            "quoteResponse": {
                "result": [{
                    "symbol": "AAPL",
                    "longName": "Apple Inc.",
                    "regularMarketPrice": 150.0,
                    "fiftyTwoWeekHigh": 200.0,
                    "fiftyTwoWeekLow": 120.0,
                    "priceEpsCurrentYear": 6.0,
                    "forwardPE": 25.0,
                    "currency": "USD"
                }],
                "error": null
            }
        })
    }

    #[test]
    fn quote_builds_record_with_derived_target() {
        let rec = quote_from_json(&apple_quote()).unwrap();
        assert_eq!(rec.ticker, "AAPL");
        assert_eq!(rec.company_name.as_deref(), Some("Apple Inc."));
        assert_eq!(rec.current_price, 150.0);
        assert_eq!(rec.target_mean_price, Some(36.0));
    }

    #[test]
    fn quote_uses_only_first_result() {
        let mut raw = apple_quote();
        let second = json!({
            "symbol": "MSFT",
            "regularMarketPrice": 400.0,
            "fiftyTwoWeekHigh": 450.0,
            "fiftyTwoWeekLow": 300.0
        });
        raw["quoteResponse"]["result"]
            .as_array_mut()
            .unwrap()
            .push(second);
        assert_eq!(quote_from_json(&raw).unwrap().ticker, "AAPL");
    }

    #[test]
    fn quote_with_zero_forward_pe_omits_target() {
        let mut raw = apple_quote();
        raw["quoteResponse"]["result"][0]["forwardPE"] = json!(0.0);
        let rec = quote_from_json(&raw).unwrap();
        assert_eq!(rec.target_mean_price, None);
    }

    #[test]
    fn quote_with_missing_forward_pe_omits_target() {
        let mut raw = apple_quote();
        raw["quoteResponse"]["result"][0]
            .as_object_mut()
            .unwrap()
            .remove("forwardPE");
        let rec = quote_from_json(&raw).unwrap();
        assert_eq!(rec.forward_pe, None);
        assert_eq!(rec.target_mean_price, None);
    }

    #[test]
    fn quote_without_result_is_no_data() {
        for raw in [
            json!({}),
            json!({"quoteResponse": null}),
            json!({"quoteResponse": {"result": null}}),
            json!({"quoteResponse": {"result": []}}),
        ] {
            assert!(quote_from_json(&raw).unwrap_err().is_no_data(), "{raw}");
        }
    }

    #[test]
    fn quote_missing_price_is_no_data() {
        let mut raw = apple_quote();
        raw["quoteResponse"]["result"][0]["regularMarketPrice"] = Value::Null;
        assert!(quote_from_json(&raw).unwrap_err().is_no_data());
    }

    fn trending_with(symbols: &[&str]) -> Value {
        let quotes: Vec<_> = symbols.iter().map(|s| json!({"symbol": s})).collect();
        json!({
            "finance": {
                "result": [{"count": quotes.len(), "quotes": quotes, "jobTimestamp": 1767623400000_i64}],
                "error": null
            }
        })
    }

    #[test]
    fn trending_keeps_first_five_in_order() {
        let raw = trending_with(&["TSLA", "NVDA", "AAPL", "AMD", "PLTR", "SOFI", "F"]);
        let entry = trending_from_json(&raw, "US").unwrap();
        assert_eq!(entry.symbols, ["TSLA", "NVDA", "AAPL", "AMD", "PLTR"]);
        assert_eq!(entry.region, "US");
    }

    #[test]
    fn trending_short_list_is_not_an_error() {
        let raw = trending_with(&["BHP.AX", "CBA.AX"]);
        let entry = trending_from_json(&raw, "AU").unwrap();
        assert_eq!(entry.symbols, ["BHP.AX", "CBA.AX"]);
    }

    #[test]
    fn trending_empty_result_is_no_data() {
        let raw = json!({"finance": {"result": []}});
        assert!(trending_from_json(&raw, "ZZ").unwrap_err().is_no_data());

        let raw = trending_with(&[]);
        assert!(trending_from_json(&raw, "ZZ").unwrap_err().is_no_data());

        assert!(trending_from_json(&json!({}), "ZZ").unwrap_err().is_no_data());
    }

    #[test]
    fn trending_skips_symbol_less_entries_before_top_five() {
        let raw = json!({
            "finance": {"result": [{"quotes": [
                {"symbol": "A"}, {"quoteType": "x"}, {"symbol": "C"},
                {"symbol": "D"}, {"symbol": "E"}, {"symbol": "F"}
            ]}]}
        });
        let entry = trending_from_json(&raw, "US").unwrap();
        assert_eq!(entry.symbols, ["A", "C", "D", "E", "F"]);
    }

    #[test]
    fn trending_without_any_symbol_is_no_data() {
        let raw = json!({
            "finance": {"result": [{"quotes": [{"foo": 1}, {"foo": 2}]}]}
        });
        assert!(trending_from_json(&raw, "US").unwrap_err().is_no_data());
    }

    #[test]
    fn trending_error_body_is_carried_into_detail() {
        let raw = json!({
            "finance": {
                "result": null,
                "error": {"code": "Not Found", "description": "region ZZ is not supported"}
            }
        });
        let err = trending_from_json(&raw, "ZZ").unwrap_err();
        assert!(err.to_string().contains("region ZZ is not supported"));
    }

    fn spark_fixture() -> Value {
        json!({
            "AAPL": {
                "symbol": "AAPL",
                "timestamp": [1767623400_i64, 1767709800_i64, 1767796200_i64, 1767882600_i64, 1767969000_i64],
                "close": [151.0, 148.5, 153.2, 152.0, 154.1],
                "chartPreviousClose": 150.2,
                "dataGranularity": 300
            }
        })
    }

    #[test]
    fn spark_converts_timestamps_and_keeps_order() {
        let series = spark_from_json(&spark_fixture(), "AAPL").unwrap();
        assert_eq!(series.points.len(), 5);
        assert!(series
            .points
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
        assert_eq!(series.points[0].timestamp.timestamp(), 1767623400);
        assert_eq!(series.points[4].close_price, 154.1);
    }

    #[test]
    fn spark_sorts_out_of_order_points() {
        let raw = json!({
            "AAPL": {"timestamp": [1767709800_i64, 1767623400_i64], "close": [2.0, 1.0]}
        });
        let series = spark_from_json(&raw, "AAPL").unwrap();
        assert_eq!(series.points[0].close_price, 1.0);
        assert_eq!(series.points[1].close_price, 2.0);
    }

    #[test]
    fn spark_drops_null_closes() {
        let raw = json!({
            "AAPL": {"timestamp": [1767623400_i64, 1767709800_i64], "close": [null, 2.0]}
        });
        let series = spark_from_json(&raw, "AAPL").unwrap();
        assert_eq!(series.points.len(), 1);
    }

    #[test]
    fn spark_missing_entry_or_close_is_no_data() {
        assert!(spark_from_json(&spark_fixture(), "MSFT")
            .unwrap_err()
            .is_no_data());

        let raw = json!({"AAPL": {"symbol": "AAPL", "timestamp": [1767623400_i64]}});
        assert!(spark_from_json(&raw, "AAPL").unwrap_err().is_no_data());

        let raw = json!({"AAPL": {"timestamp": [], "close": []}});
        assert!(spark_from_json(&raw, "AAPL").unwrap_err().is_no_data());
    }

    #[test]
    fn spark_length_mismatch_is_no_data() {
        let raw = json!({
            "AAPL": {"timestamp": [1767623400_i64], "close": [1.0, 2.0]}
        });
        assert!(spark_from_json(&raw, "AAPL").unwrap_err().is_no_data());
    }
}
