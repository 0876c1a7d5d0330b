use crate::domain::quote::{QuoteRecord, CSV_HEADER};
use crate::error::PipelineError;
use std::path::Path;

/// Header plus one data row for `record`.
pub fn export_quote_csv(record: &QuoteRecord) -> Result<String, csv::Error> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(record.csv_row())?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Writes the quote CSV to `path`, replacing any existing file.
pub fn persist_quote_csv(path: &Path, record: &QuoteRecord) -> Result<(), PipelineError> {
    let output_err = |source: std::io::Error| PipelineError::Output {
        path: path.to_path_buf(),
        source,
    };

    let body = export_quote_csv(record).map_err(|e| output_err(e.into()))?;
    std::fs::write(path, body).map_err(output_err)?;

    tracing::info!(path = %path.display(), ticker = %record.ticker, "wrote quote csv");
    Ok(())
}
