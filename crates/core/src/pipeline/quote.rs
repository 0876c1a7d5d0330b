use crate::domain::contract::quote_from_json;
use crate::domain::quote::QuoteRecord;
use crate::error::PipelineError;
use crate::ingest::provider::QuotesApi;
use crate::pipeline::print_lines;
use crate::storage::quote_csv::persist_quote_csv;
use std::io::Write;
use std::path::Path;

/// Fetches one ticker's quote, prints the summary and writes the CSV.
///
/// No CSV is written unless the response yields a record.
pub async fn run(
    api: &dyn QuotesApi,
    symbol: &str,
    csv_path: &Path,
    out: &mut dyn Write,
) -> Result<QuoteRecord, PipelineError> {
    let raw = api.fetch_quote(symbol).await?;
    let record = quote_from_json(&raw)?;

    tracing::info!(
        %symbol,
        provider = api.provider_name(),
        has_target = record.target_mean_price.is_some(),
        "quote fetched"
    );

    print_lines(out, &record.summary_lines());
    persist_quote_csv(csv_path, &record)?;
    Ok(record)
}
