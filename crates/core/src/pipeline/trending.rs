use crate::domain::contract::trending_from_json;
use crate::domain::trending::TrendingEntry;
use crate::error::PipelineError;
use crate::ingest::provider::QuotesApi;
use crate::pipeline::print_lines;
use std::io::Write;

/// Fetches a region's trending list and prints the top symbols.
pub async fn run(
    api: &dyn QuotesApi,
    region: &str,
    out: &mut dyn Write,
) -> Result<TrendingEntry, PipelineError> {
    let raw = api.fetch_trending(region).await?;
    let entry = trending_from_json(&raw, region)?;

    tracing::info!(%region, symbols = entry.symbols.len(), "trending fetched");

    print_lines(out, &entry.summary_lines());
    Ok(entry)
}
