use crate::domain::format_decimal;
use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

pub const CSV_HEADER: [&str; 6] = [
    "Ticker",
    "Company Name",
    "Current Market Price",
    "52 Week High",
    "52 Week Low",
    "Target Mean Price",
];

// Float noise below a millionth of a cent is ignored before ceiling, so
// $100.00000000000001 rounds to $100.00 rather than $100.01.
const CENT_NOISE_SCALE: f64 = 1.0e6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub ticker: String,
    pub company_name: Option<String>,
    pub current_price: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub price_eps_current_year: Option<f64>,
    pub forward_pe: Option<f64>,
    /// `price_eps_current_year / forward_pe * current_price`, ceiled to the
    /// cent. `None` when the ratio is undefined.
    pub target_mean_price: Option<f64>,
}

impl QuoteRecord {
    /// Fields of the single CSV data row, in `CSV_HEADER` order. Omitted
    /// values become empty cells.
    pub fn csv_row(&self) -> [String; 6] {
        [
            self.ticker.clone(),
            self.company_name.clone().unwrap_or_default(),
            format_decimal(self.current_price),
            format_decimal(self.fifty_two_week_high),
            format_decimal(self.fifty_two_week_low),
            self.target_mean_price
                .map(format_decimal)
                .unwrap_or_default(),
        ]
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let heading = match self.company_name.as_deref() {
            Some(name) => format!("{name} ({})", self.ticker),
            None => self.ticker.clone(),
        };
        let target = match self.target_mean_price {
            Some(v) => format!("Target Mean Price: ${}", format_decimal(v)),
            None => "Target Mean Price: N/A".to_string(),
        };

        vec![
            String::new(),
            "Stock Information:".to_string(),
            heading,
            format!("Current Market Price: ${}", format_decimal(self.current_price)),
            format!("52 Week High: ${}", format_decimal(self.fifty_two_week_high)),
            format!("52 Week Low: ${}", format_decimal(self.fifty_two_week_low)),
            target,
            String::new(),
        ]
    }
}

/// Derived target price: `eps / forward_pe * price`, ceiled to the cent.
pub fn compute_target_mean_price(
    price_eps_current_year: Option<f64>,
    forward_pe: Option<f64>,
    current_price: f64,
) -> Result<f64, PipelineError> {
    let eps = price_eps_current_year
        .ok_or_else(|| PipelineError::computation("priceEpsCurrentYear is missing"))?;
    let pe = forward_pe.ok_or_else(|| PipelineError::computation("forwardPE is missing"))?;
    if pe == 0.0 {
        return Err(PipelineError::computation("forwardPE is zero"));
    }

    let raw = eps / pe * current_price;
    if !raw.is_finite() {
        return Err(PipelineError::computation(format!(
            "target mean price is not finite (eps={eps}, forwardPE={pe}, price={current_price})"
        )));
    }

    Ok(ceil_to_cents(raw))
}

pub fn ceil_to_cents(value: f64) -> f64 {
    let cents = (value * 100.0 * CENT_NOISE_SCALE).round() / CENT_NOISE_SCALE;
    cents.ceil() / 100.0
}
