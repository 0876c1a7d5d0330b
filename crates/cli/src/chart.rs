//! Terminal line chart for a spark series.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget};
use ratatui::Terminal;

use stockpeek_core::domain::spark::SparkSeries;
use stockpeek_core::time::epoch::day_label;

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price (USD)";

const Y_GRID_LINES: usize = 5;

/// Plot-ready form of a spark series: x is epoch seconds, y is close price.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChart {
    pub title: String,
    pub points: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    /// Dotted reference lines, one horizontal per y label and one vertical
    /// per trading day.
    pub gridlines: Vec<Vec<(f64, f64)>>,
}

impl PriceChart {
    pub fn from_series(series: &SparkSeries) -> Option<Self> {
        let (y_min, y_max) = series.price_bounds()?;
        let first = series.points.first()?;
        let last = series.points.last()?;

        let points: Vec<(f64, f64)> = series
            .points
            .iter()
            .map(|p| (p.timestamp.timestamp() as f64, p.close_price))
            .collect();

        let mut x_lo = first.timestamp.timestamp() as f64;
        let mut x_hi = last.timestamp.timestamp() as f64;
        if x_hi <= x_lo {
            // Single point: widen by half a day each side.
            x_lo -= 43_200.0;
            x_hi += 43_200.0;
        }

        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 { y_range * 0.05 } else { y_max.abs().max(1.0) * 0.01 };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;

        let y_ticks: Vec<f64> = (0..Y_GRID_LINES)
            .map(|i| y_lower + (y_upper - y_lower) * i as f64 / (Y_GRID_LINES - 1) as f64)
            .collect();

        let mut x_labels = vec![day_label(first.timestamp)];
        if series.points.len() > 2 {
            x_labels.push(day_label(series.points[series.points.len() / 2].timestamp));
        }
        if series.points.len() > 1 {
            x_labels.push(day_label(last.timestamp));
        }

        let mut gridlines: Vec<Vec<(f64, f64)>> = y_ticks
            .iter()
            .map(|&y| vec![(x_lo, y), (x_hi, y)])
            .collect();
        gridlines.extend(
            points
                .iter()
                .map(|&(x, _)| vec![(x, y_lower), (x, y_upper)]),
        );

        Some(Self {
            title: series.chart_title(),
            points,
            x_bounds: [x_lo, x_hi],
            y_bounds: [y_lower, y_upper],
            x_labels,
            y_labels: y_ticks.iter().map(|y| format!("${y:.2}")).collect(),
            gridlines,
        })
    }
}

impl Widget for &PriceChart {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid_style = Style::default().fg(Color::DarkGray);
        let mut datasets: Vec<Dataset> = self
            .gridlines
            .iter()
            .map(|line| {
                Dataset::default()
                    .marker(symbols::Marker::Dot)
                    .graph_type(GraphType::Line)
                    .style(grid_style)
                    .data(line)
            })
            .collect();
        datasets.push(
            Dataset::default()
                .name("Close")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&self.points),
        );

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!(" {} ", self.title))
                    .title_bottom(" press any key to close ")
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(X_AXIS_TITLE, Style::default().fg(Color::Gray)))
                    .style(grid_style)
                    .bounds(self.x_bounds)
                    .labels(self.x_labels.iter().map(|s| Span::raw(s.clone()))),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(Y_AXIS_TITLE, Style::default().fg(Color::Gray)))
                    .style(grid_style)
                    .bounds(self.y_bounds)
                    .labels(self.y_labels.iter().map(|s| Span::raw(s.clone()))),
            );

        chart.render(area, buf);
    }
}

pub trait ChartPresenter {
    fn present(&mut self, series: &SparkSeries) -> Result<()>;
}

/// Full-screen chart that blocks until a key is pressed.
pub struct TerminalPresenter;

impl ChartPresenter for TerminalPresenter {
    fn present(&mut self, series: &SparkSeries) -> Result<()> {
        let Some(chart) = PriceChart::from_series(series) else {
            tracing::warn!(symbol = %series.symbol, "empty series; nothing to plot");
            return Ok(());
        };

        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err).context("failed to enter alternate screen");
        }

        let result = draw_until_key(&chart);

        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        result
    }
}

fn draw_until_key(chart: &PriceChart) -> Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    loop {
        terminal.draw(|f| f.render_widget(chart, f.area()))?;
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => break,
            _ => {}
        }
    }

    terminal.show_cursor()?;
    Ok(())
}

/// Used when there is no interactive terminal or charts are disabled.
pub struct SkipPresenter {
    pub reason: &'static str,
}

impl ChartPresenter for SkipPresenter {
    fn present(&mut self, series: &SparkSeries) -> Result<()> {
        tracing::info!(
            symbol = %series.symbol,
            points = series.points.len(),
            reason = self.reason,
            "chart presentation skipped"
        );
        Ok(())
    }
}

pub fn presenter_for(no_chart: bool) -> Box<dyn ChartPresenter> {
    if no_chart {
        Box::new(SkipPresenter { reason: "--no-chart" })
    } else if !io::stdout().is_terminal() {
        Box::new(SkipPresenter { reason: "stdout is not a terminal" })
    } else {
        Box::new(TerminalPresenter)
    }
}
