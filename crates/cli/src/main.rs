use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockpeek_core::ingest::provider::YfApiClient;
use stockpeek_core::pipeline::{normalize_symbol, Pipeline};

mod chart;
mod prompt;
mod session;

#[derive(Debug, Parser)]
#[command(name = "stockpeek", about = "Quote, trending and 5-day price chart for a ticker")]
struct Args {
    /// Ticker symbol (e.g. AAPL). Prompted for when omitted.
    #[arg(short, long)]
    symbol: Option<String>,

    /// Trending region: US, AU, CA, FR, DE, IT, ES, GB, IN. Prompted for when omitted.
    #[arg(short, long)]
    region: Option<String>,

    /// CSV output path. Defaults to STOCKPEEK_OUTPUT or ./output.csv.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not open the price chart.
    #[arg(long)]
    no_chart: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = stockpeek_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let stdin = io::stdin();
    let raw_symbol = match args.symbol.as_deref() {
        Some(s) => s.to_string(),
        None => prompt::read_line(&prompt::symbol_prompt(), &mut stdin.lock(), &mut io::stdout())?,
    };
    let symbol = normalize_symbol(&raw_symbol)?;

    let csv_path = args.output.clone().unwrap_or_else(|| settings.output_path());
    let api = YfApiClient::from_settings(&settings)?;
    let mut presenter = chart::presenter_for(args.no_chart);

    tracing::info!(%symbol, csv = %csv_path.display(), "stockpeek run started");

    let input = session::SessionInput { symbol, csv_path };
    let region_arg = args.region.clone();
    let region = move || -> anyhow::Result<String> {
        match region_arg {
            Some(r) => Ok(r),
            None => {
                let stdin = io::stdin();
                let mut lock = stdin.lock();
                read_region(&mut lock, &mut io::stdout())
            }
        }
    };

    let mut stdout = io::stdout();
    let report = session::run_session(&api, &input, region, presenter.as_mut(), &mut stdout).await;
    stdout.flush().context("failed to flush stdout")?;

    tracing::info!(
        failures = report.failures.len(),
        quote_ok = report.succeeded(Pipeline::Quote),
        trending_ok = report.succeeded(Pipeline::Trending),
        spark_ok = report.succeeded(Pipeline::Spark),
        "stockpeek run finished"
    );
    Ok(())
}

fn read_region(input: &mut dyn BufRead, out: &mut dyn Write) -> anyhow::Result<String> {
    prompt::read_line(&prompt::region_prompt(), input, out)
}

fn init_sentry(settings: &stockpeek_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_non_interactive_flags() {
        let args = Args::try_parse_from([
            "stockpeek", "-s", "aapl", "--region", "gb", "-o", "/tmp/q.csv", "--no-chart",
        ])
        .unwrap();
        assert_eq!(args.symbol.as_deref(), Some("aapl"));
        assert_eq!(args.region.as_deref(), Some("gb"));
        assert_eq!(args.output, Some(PathBuf::from("/tmp/q.csv")));
        assert!(args.no_chart);
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["stockpeek"]).unwrap();
        assert!(args.symbol.is_none());
        assert!(args.region.is_none());
        assert!(!args.no_chart);
    }

    #[test]
    fn region_is_read_from_input() {
        let mut input = io::Cursor::new("de\n");
        let mut out = Vec::new();
        assert_eq!(read_region(&mut input, &mut out).unwrap(), "de\n");
    }
}
