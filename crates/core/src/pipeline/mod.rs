//! The three request/shape/present pipelines.
//!
//! Each pipeline fetches through a [`QuotesApi`](crate::ingest::provider::QuotesApi),
//! shapes the raw JSON into domain records and returns a `PipelineError` on
//! failure. Callers report the error with [`failure_message`] and move on to
//! the next pipeline.

pub mod quote;
pub mod spark;
pub mod trending;

use crate::error::PipelineError;
use std::fmt;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Quote,
    Trending,
    Spark,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Quote => "quote",
            Self::Trending => "trending",
            Self::Spark => "spark",
        };
        f.write_str(name)
    }
}

/// User-facing line printed when `pipeline` ends with `err`.
pub fn failure_message(pipeline: Pipeline, err: &PipelineError) -> String {
    match err {
        PipelineError::NoData { .. } => match pipeline {
            Pipeline::Quote => "Error: No data found for the provided stock symbol.".to_string(),
            Pipeline::Trending => {
                "Error: No trending stock data found for the specified region.".to_string()
            }
            Pipeline::Spark => {
                "Error: No historical data found for the provided stock symbol.".to_string()
            }
        },
        PipelineError::Transport { .. } => {
            let what = match pipeline {
                Pipeline::Quote => "data",
                Pipeline::Trending => "trending stocks data",
                Pipeline::Spark => "historical data",
            };
            format!("Error: Failed to fetch {what} from API. Details: {err}")
        }
        PipelineError::Computation { detail } => {
            format!("Error: Could not compute derived values. Details: {detail}")
        }
        PipelineError::Output { path, source } => {
            format!("Error: Failed to write {}. Details: {source}", path.display())
        }
    }
}

/// Writes report lines to `out`. A broken console is logged, not fatal.
pub fn print_lines(out: &mut dyn Write, lines: &[String]) {
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            tracing::warn!(error = %err, "failed to write report line");
            return;
        }
    }
}

/// Trims and uppercases a ticker symbol.
pub fn normalize_symbol(raw: &str) -> anyhow::Result<String> {
    let symbol = raw.trim().to_uppercase();
    anyhow::ensure!(!symbol.is_empty(), "ticker symbol must be non-empty");
    Ok(symbol)
}

/// Trims and uppercases a region code. Membership in
/// [`KNOWN_REGIONS`](crate::domain::trending::KNOWN_REGIONS) is left to the API.
pub fn normalize_region(raw: &str) -> anyhow::Result<String> {
    let region = raw.trim().to_uppercase();
    anyhow::ensure!(!region.is_empty(), "region code must be non-empty");
    Ok(region)
}

#[cfg(test)]
pub(crate) mod fake {
    use crate::error::PipelineError;
    use crate::ingest::provider::QuotesApi;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Canned responses keyed by endpoint; records every call it receives.
    #[derive(Default)]
    pub struct FakeApi {
        pub quote: Option<Value>,
        pub trending: Option<Value>,
        pub spark: Option<Value>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn respond(
            &self,
            endpoint: &'static str,
            arg: &str,
            canned: &Option<Value>,
        ) -> Result<Value, PipelineError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{endpoint}:{arg}"));
            canned
                .clone()
                .ok_or_else(|| PipelineError::transport(endpoint, "connection refused"))
        }
    }

    #[async_trait::async_trait]
    impl QuotesApi for FakeApi {
        fn provider_name(&self) -> &'static str {
            "fake"
        }

        async fn fetch_quote(&self, symbol: &str) -> Result<Value, PipelineError> {
            self.respond("quote", symbol, &self.quote)
        }

        async fn fetch_trending(&self, region: &str) -> Result<Value, PipelineError> {
            self.respond("trending", region, &self.trending)
        }

        async fn fetch_spark(&self, symbol: &str) -> Result<Value, PipelineError> {
            self.respond("spark", symbol, &self.spark)
        }
    }
}
