use crate::error::PipelineError;
use chrono::{DateTime, Utc};

pub fn from_epoch_seconds(secs: i64) -> Result<DateTime<Utc>, PipelineError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| PipelineError::no_data(format!("timestamp out of range: {secs}")))
}

/// Axis label for a daily point.
pub fn day_label(ts: DateTime<Utc>) -> String {
    ts.format("%m-%d").to_string()
}
