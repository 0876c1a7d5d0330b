use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};

use stockpeek_core::domain::trending::KNOWN_REGIONS;

pub fn symbol_prompt() -> String {
    "Which stock would you like to analyze?\n(Enter ticker symbol Ex: AAPL): ".to_string()
}

pub fn region_prompt() -> String {
    format!(
        "Which region would you like to see the Top 5 trending stocks for?\n(Options: {}):",
        KNOWN_REGIONS.join(", ")
    )
}

/// Prints `prompt` and reads one line. End of input is an error.
pub fn read_line(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Result<String> {
    write!(out, "{prompt}").context("failed to write prompt")?;
    out.flush().context("failed to flush prompt")?;

    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    if n == 0 {
        bail!("input closed before an answer was given");
    }
    Ok(line)
}
