use crate::domain::contract::spark_from_json;
use crate::domain::spark::{SparkSeries, SPARK_INTERVAL, SPARK_RANGE};
use crate::error::PipelineError;
use crate::ingest::provider::QuotesApi;

/// Fetches the last five daily closes for `symbol`.
pub async fn run(api: &dyn QuotesApi, symbol: &str) -> Result<SparkSeries, PipelineError> {
    let raw = api.fetch_spark(symbol).await?;
    let series = spark_from_json(&raw, symbol)?;

    tracing::info!(
        %symbol,
        range = SPARK_RANGE,
        interval = SPARK_INTERVAL,
        points = series.points.len(),
        "spark fetched"
    );
    Ok(series)
}
