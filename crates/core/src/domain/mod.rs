pub mod contract;
pub mod quote;
pub mod spark;
pub mod trending;

/// Shortest round-trip rendering of a price that always keeps a fractional
/// part (`150.0`, `36.0`, `34.74`).
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}
