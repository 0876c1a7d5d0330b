use serde::{Deserialize, Serialize};

pub const TOP_N: usize = 5;

/// Region codes offered in prompts. Membership is not enforced; the API
/// decides what it accepts.
pub const KNOWN_REGIONS: [&str; 9] = ["US", "AU", "CA", "FR", "DE", "IT", "ES", "GB", "IN"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub region: String,
    /// At most `TOP_N` symbols, in the API's relevance order.
    pub symbols: Vec<String>,
}

impl TrendingEntry {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.symbols.len() + 2);
        out.push(String::new());
        out.push(format!("Top {TOP_N} Trending Stocks:"));
        out.extend(
            self.symbols
                .iter()
                .enumerate()
                .map(|(i, symbol)| format!("{}. {symbol}", i + 1)),
        );
        out
    }
}
