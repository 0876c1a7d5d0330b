use crate::config::Settings;
use crate::domain::spark::{SPARK_INTERVAL, SPARK_RANGE};
use crate::error::PipelineError;
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::time::Duration;

const QUOTE_PATH: &str = "/v6/finance/quote";
const TRENDING_PATH: &str = "/v1/finance/trending";
const SPARK_PATH: &str = "/v8/finance/spark";

// Error bodies are echoed into messages; keep them short.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Remote quotes API. Each call returns the decoded JSON body of a 2xx
/// response; shaping into records happens in `domain::contract`.
#[async_trait::async_trait]
pub trait QuotesApi: Send + Sync {
    fn provider_name(&self) -> &'static str;

    async fn fetch_quote(&self, symbol: &str) -> Result<Value, PipelineError>;

    async fn fetch_trending(&self, region: &str) -> Result<Value, PipelineError>;

    async fn fetch_spark(&self, symbol: &str) -> Result<Value, PipelineError>;
}

#[derive(Debug, Clone)]
pub struct YfApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl YfApiClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        if settings.api_key.is_none() {
            tracing::warn!("API_KEY is not set; requests will be unauthenticated");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs()))
            .build()
            .context("failed to build quotes api http client")?;

        Ok(Self {
            http,
            base_url: settings.base_url().to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn headers(&self, endpoint: &'static str) -> Result<HeaderMap, PipelineError> {
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.api_key {
            let value = HeaderValue::from_str(api_key).map_err(|e| {
                PipelineError::transport(endpoint, format!("API_KEY is not a valid header value: {e}"))
            })?;
            headers.insert("x-api-key", value);
        }
        Ok(headers)
    }

    async fn get_json(
        &self,
        endpoint: &'static str,
        url: String,
        query: &[(&str, &str)],
    ) -> Result<Value, PipelineError> {
        let headers = self.headers(endpoint)?;

        tracing::debug!(endpoint, %url, ?query, "quotes api request");
        let res = self
            .http
            .get(url)
            .headers(headers)
            .query(query)
            .send()
            .await
            .map_err(|e| PipelineError::transport(endpoint, e.to_string()))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| PipelineError::transport(endpoint, format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(PipelineError::transport(
                endpoint,
                format!("HTTP {status}: {}", truncate(&text, MAX_ERROR_BODY_CHARS)),
            ));
        }

        serde_json::from_str::<Value>(&text).map_err(|e| {
            PipelineError::transport(endpoint, format!("response is not valid JSON: {e}"))
        })
    }
}

#[async_trait::async_trait]
impl QuotesApi for YfApiClient {
    fn provider_name(&self) -> &'static str {
        "yfapi"
    }

    async fn fetch_quote(&self, symbol: &str) -> Result<Value, PipelineError> {
        self.get_json("quote", self.url(QUOTE_PATH), &[("symbols", symbol)])
            .await
    }

    async fn fetch_trending(&self, region: &str) -> Result<Value, PipelineError> {
        let url = self.url(&format!("{TRENDING_PATH}/{region}"));
        self.get_json("trending", url, &[]).await
    }

    async fn fetch_spark(&self, symbol: &str) -> Result<Value, PipelineError> {
        self.get_json(
            "spark",
            self.url(SPARK_PATH),
            &[
                ("symbols", symbol),
                ("range", SPARK_RANGE),
                ("interval", SPARK_INTERVAL),
            ],
        )
        .await
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
