use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SPARK_RANGE: &str = "5d";
pub const SPARK_INTERVAL: &str = "1d";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SparkPoint {
    pub timestamp: DateTime<Utc>,
    pub close_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparkSeries {
    pub symbol: String,
    /// Ascending by timestamp.
    pub points: Vec<SparkPoint>,
}

impl SparkSeries {
    pub fn chart_title(&self) -> String {
        format!("{} Stock Price Over the Last 5 Days", self.symbol)
    }

    /// `(min, max)` of the close prices, `None` for an empty series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|p| p.close_price);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}
