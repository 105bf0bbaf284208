//! Equity chart: founder ownership after each round.
//!
//! The chart is drawn with ratatui's `Chart` widget into an off-screen `Buffer`
//! and then flattened to plain text, so it can be printed below the table
//! without taking over the terminal.

use calculator::DilutionReport;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

pub const CHART_TITLE: &str = "Founder Equity Dilution Over Rounds";
pub const X_AXIS_TITLE: &str = "Funding Round";
pub const Y_AXIS_TITLE: &str = "Equity (%)";
pub const SERIES_NAME: &str = "Founder Equity";
pub const EMPTY_NOTICE: &str = "No funding rounds to plot.";

/// ratatui's canvas multiplies width by height in `u16`; larger areas overflow.
pub const MAX_CHART_CELLS: u32 = u16::MAX as u32;

/// Renders a dilution report as a chart of post-round equity against round index.
pub trait ChartRenderer {
    fn render_chart(&self, report: &DilutionReport) -> String;
}

/// A `ChartRenderer` producing a fixed-size text chart.
#[derive(Debug, Clone, Copy)]
pub struct TerminalChartRenderer {
    width: u16,
    height: u16,
}

impl TerminalChartRenderer {
    /// Creates a renderer of `width` x `height` cells. The height is reduced when
    /// the area would exceed `MAX_CHART_CELLS`.
    pub fn new(width: u16, height: u16) -> Self {
        let width = width.max(1);
        let max_height = (MAX_CHART_CELLS / u32::from(width)) as u16;
        Self {
            width,
            height: height.min(max_height),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }
}

impl Default for TerminalChartRenderer {
    fn default() -> Self {
        Self::new(80, 20)
    }
}

impl ChartRenderer for TerminalChartRenderer {
    fn render_chart(&self, report: &DilutionReport) -> String {
        if report.is_empty() {
            return EMPTY_NOTICE.to_string();
        }

        tracing::debug!(
            rounds = report.len(),
            width = self.width,
            height = self.height,
            "Rendering equity chart"
        );

        let points = equity_points(report);
        let area = Rect::new(0, 0, self.width, self.height);
        let mut buf = Buffer::empty(area);
        EquityChart::new(report, &points).render(area, &mut buf);

        buffer_to_text(&buf)
    }
}

/// (round index, post-round equity) pairs.
fn equity_points(report: &DilutionReport) -> Vec<(f64, f64)> {
    report
        .records()
        .iter()
        .map(|record| (record.round() as f64, to_plot(record.post_round_equity())))
        .collect()
}

fn to_plot(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

struct EquityChart<'a> {
    report: &'a DilutionReport,
    points: &'a [(f64, f64)],
}

impl<'a> EquityChart<'a> {
    fn new(report: &'a DilutionReport, points: &'a [(f64, f64)]) -> Self {
        Self { report, points }
    }
}

impl Widget for EquityChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Rounds start at 1; keep at least one unit of width for a single round.
        let rounds = self.report.len().max(2) as f64;

        let y_max = self
            .points
            .iter()
            .map(|&(_, equity)| equity)
            .fold(to_plot(self.report.initial_equity()), f64::max);
        let y_upper = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

        let datasets = vec![
            Dataset::default()
                .name(SERIES_NAME)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(self.points),
            // Unnamed, so it stays out of the legend; marks each round.
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Blue))
                .data(self.points),
        ];

        let x_labels = vec![
            Span::raw("1"),
            Span::raw(format!("{}", rounds as usize)),
        ];
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(format!("{:.1}", y_upper / 2.0)),
            Span::raw(format!("{:.1}", y_upper)),
        ];

        Chart::new(datasets)
            .block(
                Block::default()
                    .title(Span::styled(
                        format!(" {CHART_TITLE} "),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .title(X_AXIS_TITLE)
                    .bounds([1.0, rounds])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Y_AXIS_TITLE)
                    .bounds([0.0, y_upper])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}

/// Flattens a rendered buffer into lines of text, dropping trailing blanks.
fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.top()..area.bottom() {
        let line: String = (area.left()..area.right())
            .map(|x| buf.cell((x, y)).map_or(" ", |cell| cell.symbol()))
            .collect();
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}
