use std::io::Write;
use std::path::PathBuf;

use stockpeek_core::error::PipelineError;
use stockpeek_core::ingest::provider::QuotesApi;
use stockpeek_core::pipeline::{self, failure_message, normalize_region, print_lines, Pipeline};

use crate::chart::ChartPresenter;

#[derive(Debug, Clone)]
pub struct SessionInput {
    pub symbol: String,
    pub csv_path: PathBuf,
}

/// Which pipelines failed, in run order.
#[derive(Debug, Default)]
pub struct SessionReport {
    pub failures: Vec<(Pipeline, &'static str)>,
}

impl SessionReport {
    pub fn succeeded(&self, pipeline: Pipeline) -> bool {
        !self.failures.iter().any(|(p, _)| *p == pipeline)
    }
}

/// Runs quote, trending and spark in sequence. A failure in one pipeline
/// is reported and the next one still runs.
///
/// `region` is resolved only after the quote pipeline finishes so an
/// interactive prompt appears in the same order as the output.
pub async fn run_session(
    api: &dyn QuotesApi,
    input: &SessionInput,
    region: impl FnOnce() -> anyhow::Result<String>,
    presenter: &mut dyn ChartPresenter,
    out: &mut dyn Write,
) -> SessionReport {
    let mut report = SessionReport::default();
    let symbol = input.symbol.as_str();

    if let Err(err) = pipeline::quote::run(api, symbol, &input.csv_path, out).await {
        fail(&mut report, out, Pipeline::Quote, err);
    }

    match region().and_then(|raw| normalize_region(&raw)) {
        Ok(region) => {
            if let Err(err) = pipeline::trending::run(api, &region, out).await {
                fail(&mut report, out, Pipeline::Trending, err);
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "no region; trending skipped");
            print_lines(out, &[format!("Error: {err:#}")]);
            report.failures.push((Pipeline::Trending, "input"));
        }
    }

    match pipeline::spark::run(api, symbol).await {
        Ok(series) => {
            if let Err(err) = presenter.present(&series) {
                sentry_anyhow::capture_anyhow(&err);
                tracing::error!(error = %err, "failed to present chart");
                print_lines(out, &[format!("Error: Failed to display chart. Details: {err:#}")]);
                report.failures.push((Pipeline::Spark, "chart"));
            }
        }
        Err(err) => fail(&mut report, out, Pipeline::Spark, err),
    }

    report
}

fn fail(report: &mut SessionReport, out: &mut dyn Write, pipeline: Pipeline, err: PipelineError) {
    let kind = err.kind();
    if err.is_no_data() {
        tracing::warn!(%pipeline, error = %err, "pipeline returned no data");
    } else {
        tracing::error!(%pipeline, kind, error = %err, "pipeline failed");
    }

    print_lines(out, &[failure_message(pipeline, &err)]);

    if !err.is_no_data() {
        sentry_anyhow::capture_anyhow(&anyhow::Error::new(err));
    }
    report.failures.push((pipeline, kind));
}
