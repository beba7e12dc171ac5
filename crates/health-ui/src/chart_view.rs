//! "Health Goals" chart of per-period averages.
//!
//! Steps live on a much larger scale than sleep hours or litres of water, so
//! the view stacks two charts: steps on top, sleep and water below. Both share
//! the period labels on the x axis.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};

use health_core::formatting;
use health_core::models::Period;
use health_data::aggregator::PeriodAverages;

use crate::themes::Theme;

/// Chart points derived from a report series. X values are period indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub steps: Vec<(f64, f64)>,
    pub sleep: Vec<(f64, f64)>,
    pub water: Vec<(f64, f64)>,
}

impl ChartSeries {
    pub fn from_averages(averages: &[PeriodAverages]) -> Self {
        let mut series = ChartSeries::default();
        for (i, avg) in averages.iter().enumerate() {
            let x = i as f64;
            series.labels.push(avg.label.clone());
            series.steps.push((x, avg.steps_avg as f64));
            series.sleep.push((x, avg.sleep_avg));
            series.water.push((x, avg.water_avg));
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Right edge of the x axis; at least 1 so a single period still has
    /// a non-degenerate axis.
    pub fn x_max(&self) -> f64 {
        (self.labels.len().saturating_sub(1)).max(1) as f64
    }
}

/// Top of a y axis holding `values`, with 10 % headroom. Never below 1.
pub fn upper_bound<'a>(values: impl IntoIterator<Item = &'a (f64, f64)>) -> f64 {
    let max = values
        .into_iter()
        .map(|(_, y)| *y)
        .filter(|y| y.is_finite())
        .fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

/// Period labels shown under the x axis: first, middle and last.
pub fn axis_labels(labels: &[String]) -> Vec<String> {
    match labels.len() {
        0 => Vec::new(),
        1 | 2 => labels.to_vec(),
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

/// Title of the chart for `period`, e.g. `"Health Goals - Weekly"`.
pub fn chart_title(period: Period) -> String {
    format!("Health Goals - {}", period.label())
}

/// Let the legend take up to half of each chart before ratatui hides it.
const LEGEND_CONSTRAINTS: (Constraint, Constraint) = (Constraint::Ratio(1, 2), Constraint::Ratio(1, 2));

fn graph_type(points: usize) -> GraphType {
    // A line through one point draws nothing.
    if points > 1 {
        GraphType::Line
    } else {
        GraphType::Scatter
    }
}

fn y_labels(top: f64, decimals: u32) -> Vec<Line<'static>> {
    [0.0, top / 2.0, top]
        .into_iter()
        .map(|v| Line::from(formatting::format_number(v, decimals)))
        .collect()
}

/// Render the goals chart for `averages` into `area`.
pub fn render_goals_chart(
    frame: &mut Frame,
    area: Rect,
    period: Period,
    averages: &[PeriodAverages],
    theme: &Theme,
) {
    let series = ChartSeries::from_averages(averages);
    if series.is_empty() {
        render_no_data(frame, area, theme);
        return;
    }

    let x_labels: Vec<Line> = axis_labels(&series.labels)
        .into_iter()
        .map(Line::from)
        .collect();
    let x_bounds = [0.0, series.x_max()];
    let kind = graph_type(series.labels.len());

    let [top, bottom] =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    // Steps.
    let steps_top = upper_bound(&series.steps);
    let steps_chart = Chart::new(vec![Dataset::default()
        .name("Avg Steps")
        .marker(symbols::Marker::Braille)
        .graph_type(kind)
        .style(theme.series_steps)
        .data(&series.steps)])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(format!(" {} ", chart_title(period)), theme.header)),
    )
    .x_axis(
        Axis::default()
            .style(theme.axis)
            .bounds(x_bounds)
            .labels(x_labels.clone()),
    )
    .y_axis(
        Axis::default()
            .title("Steps")
            .style(theme.axis)
            .bounds([0.0, steps_top])
            .labels(y_labels(steps_top, 0)),
    )
    .legend_position(Some(LegendPosition::TopLeft))
    .hidden_legend_constraints(LEGEND_CONSTRAINTS);

    // Sleep and water.
    let small_top = upper_bound(series.sleep.iter().chain(series.water.iter()));
    let small_chart = Chart::new(vec![
        Dataset::default()
            .name("Avg Sleep (hrs)")
            .marker(symbols::Marker::Braille)
            .graph_type(kind)
            .style(theme.series_sleep)
            .data(&series.sleep),
        Dataset::default()
            .name("Avg Water (L)")
            .marker(symbols::Marker::Braille)
            .graph_type(kind)
            .style(theme.series_water)
            .data(&series.water),
    ])
    .block(Block::default().borders(Borders::ALL))
    .x_axis(
        Axis::default()
            .title(period.axis_label())
            .style(theme.axis)
            .bounds(x_bounds)
            .labels(x_labels),
    )
    .y_axis(
        Axis::default()
            .title("Averages")
            .style(theme.axis)
            .bounds([0.0, small_top])
            .labels(y_labels(small_top, 1)),
    )
    .legend_position(Some(LegendPosition::TopLeft))
    .hidden_legend_constraints(LEGEND_CONSTRAINTS);

    frame.render_widget(steps_chart, top);
    frame.render_widget(small_chart, bottom);
}

/// Render a "no data" placeholder when there is nothing to chart.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No records found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Add a day with `health-tracker add` first.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Esc to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(ratatui::text::Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Health Tracker "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────
