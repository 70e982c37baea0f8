//! Reusable chart renderers. Contract shared by all of them: while the
//! chart's key is pending the widget shows a spinner, with no data it shows
//! a fixed placeholder, otherwise the visualization. None of them mutate
//! the data they receive.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{value_bounds, DonutSlice};
use crate::ui::theme::{palette, Palette, CATEGORICAL};

pub fn chart_block(title: &str, colors: &Palette) -> Block<'static> {
    Block::default()
        .title(title.to_owned())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.accent))
}

pub fn render_loading(f: &mut Frame<'_>, area: Rect, app: &App, title: &str) {
    let colors = palette(app.theme);
    let block = chart_block(title, &colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let throbber = Throbber::default()
        .label("Cargando...")
        .style(Style::default().fg(colors.dim))
        .throbber_style(Style::default().fg(colors.accent).add_modifier(Modifier::BOLD));
    // The shared spinner state advances once per frame in `App::update`.
    let mut state = app.throbber.clone();
    f.render_stateful_widget(throbber, inner, &mut state);
}

pub fn render_empty(f: &mut Frame<'_>, area: Rect, app: &App, title: &str) {
    let colors = palette(app.theme);
    let block = chart_block(title, &colors);
    let paragraph = Paragraph::new("No hay datos disponibles")
        .block(block)
        .style(Style::default().fg(colors.dim))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Vertical bar chart from (label, value) pairs.
pub fn render_bar_chart(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    data: &[(String, u64)],
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if data.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);

    let bar_width = bar_width_for(area, data.len());
    let bars: Vec<Bar<'_>> = data
        .iter()
        .map(|(label, value)| {
            Bar::default()
                .value(*value)
                .label(TextLine::from(truncated(label, usize::from(bar_width))))
                .style(Style::default().fg(colors.accent))
                .value_style(Style::default().fg(colors.text).add_modifier(Modifier::BOLD))
        })
        .collect();

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);

    let chart = BarChart::default()
        .block(chart_block(title, &colors))
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(bar_width);

    f.render_widget(chart, area);
}

/// Horizontal ranking rendered as label, bar and value lines. Reads better
/// than a vertical chart for long Spanish labels.
pub fn render_ranking_bars(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    data: &[(String, u64)],
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if data.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);
    let block = chart_block(title, &colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);
    let label_width = 18_usize;
    let bar_space = usize::from(inner.width).saturating_sub(label_width + 10).max(4);

    let lines: Vec<TextLine<'_>> = data
        .iter()
        .take(usize::from(inner.height))
        .map(|(label, value)| {
            let filled = ((*value as f64 / max_value as f64) * bar_space as f64).round() as usize;
            TextLine::from(vec![
                Span::styled(
                    format!("{:<label_width$}", truncated(label, label_width)),
                    Style::default().fg(colors.text),
                ),
                Span::styled("█".repeat(filled.max(1)), Style::default().fg(colors.accent)),
                Span::styled(
                    format!(" {}", crate::chart::format_number(*value as f64)),
                    Style::default().fg(colors.dim),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Grouped bars, two series per group (used for gender by crime type).
pub fn render_grouped_bars(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    series: (&str, &str),
    rows: &[(String, u64, u64)],
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if rows.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);

    let mut chart = BarChart::default()
        .block(chart_block(title, &colors))
        .bar_gap(0)
        .group_gap(2)
        .bar_width(4);

    let max_value = rows
        .iter()
        .map(|(_, a, b)| (*a).max(*b))
        .max()
        .unwrap_or(0)
        .max(1);
    chart = chart.max(max_value);

    let bar_sets: Vec<[Bar<'_>; 2]> = rows
        .iter()
        .map(|(_, fem, mas)| {
            [
                Bar::default()
                    .value(*fem)
                    .label(TextLine::from(series.0))
                    .style(Style::default().fg(colors.series_a)),
                Bar::default()
                    .value(*mas)
                    .label(TextLine::from(series.1))
                    .style(Style::default().fg(colors.series_b)),
            ]
        })
        .collect();
    for ((label, _, _), bars) in rows.iter().zip(&bar_sets) {
        chart = chart.data(
            BarGroup::default()
                .label(TextLine::from(truncated(label, 12)))
                .bars(bars),
        );
    }

    f.render_widget(chart, area);
}

/// Donut chart: a canvas ring swept per slice, with a legend carrying the
/// integer percent per slice and the one-decimal detail.
pub fn render_donut(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    slices: &[DonutSlice],
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if slices.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);
    let block = chart_block(title, &colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(inner);

    render_donut_canvas(f, halves[0], slices);

    let legend: Vec<TextLine<'_>> = slices
        .iter()
        .enumerate()
        .take(usize::from(halves[1].height))
        .map(|(i, slice)| {
            let color = CATEGORICAL[i % CATEGORICAL.len()];
            TextLine::from(vec![
                Span::styled("■ ", Style::default().fg(color)),
                Span::styled(
                    format!("{} {}", truncated(&slice.label, 16), slice.percent_label()),
                    Style::default().fg(colors.text),
                ),
                Span::styled(
                    format!(
                        " ({}, {})",
                        crate::chart::format_number(slice.value),
                        slice.percent_detail()
                    ),
                    Style::default().fg(colors.dim),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(legend), halves[1]);
}

fn render_donut_canvas(f: &mut Frame<'_>, area: Rect, slices: &[DonutSlice]) {
    if area.width < 4 || area.height < 4 {
        return;
    }
    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                let width = f64::from(area.width);
                let height = f64::from(area.height);
                let center_x = width / 2.0;
                let center_y = height / 2.0;
                let outer = width.min(height * 2.0) / 2.0 * 0.9;
                let hole = outer * 0.45;

                let mut start = -std::f64::consts::FRAC_PI_2;
                for (i, slice) in slices.iter().enumerate() {
                    let sweep = slice.fraction * std::f64::consts::TAU;
                    let color = CATEGORICAL[i % CATEGORICAL.len()];
                    let steps = (sweep / 0.03).ceil().max(1.0) as usize;
                    for step in 0..=steps {
                        let angle = start + sweep * (step as f64 / steps as f64);
                        // Terminal cells are roughly twice as tall as wide.
                        let (sin, cos) = angle.sin_cos();
                        ctx.draw(&CanvasLine {
                            x1: cos.mul_add(hole, center_x),
                            y1: sin.mul_add(hole / 2.0, center_y),
                            x2: cos.mul_add(outer, center_x),
                            y2: sin.mul_add(outer / 2.0, center_y),
                            color,
                        });
                    }
                    start += sweep;
                }

                ctx.draw(&Circle {
                    x: center_x,
                    y: center_y,
                    radius: hole * 0.5,
                    color: ratatui::style::Color::Reset,
                });
            })
            .x_bounds([0.0, f64::from(area.width)])
            .y_bounds([0.0, f64::from(area.height)]),
        area,
    );
}

/// Single line chart over (x, y) points.
pub fn render_line_series(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    series_name: &str,
    data: &[(f64, f64)],
    x_labels: Vec<String>,
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if data.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);
    let datasets = vec![Dataset::default()
        .name(series_name.to_owned())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(colors.accent))
        .data(data)];
    render_chart(f, area, &colors, title, datasets, &[data], x_labels);
}

/// Two overlaid lines sharing the x axis (crimes vs precipitation, or
/// history vs prediction).
pub fn render_two_lines(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    a: (&str, &[(f64, f64)]),
    b: (&str, &[(f64, f64)]),
    x_labels: Vec<String>,
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if a.1.is_empty() && b.1.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);
    let datasets = vec![
        Dataset::default()
            .name(a.0.to_owned())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors.series_a))
            .data(a.1),
        Dataset::default()
            .name(b.0.to_owned())
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(colors.prediction))
            .data(b.1),
    ];
    render_chart(f, area, &colors, title, datasets, &[a.1, b.1], x_labels);
}

/// Scatter plot of (x, y) points.
pub fn render_scatter(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    x_title: &str,
    y_title: &str,
    data: &[(f64, f64)],
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if data.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);

    let xs: Vec<f64> = data.iter().map(|(x, _)| *x).collect();
    let ys: Vec<f64> = data.iter().map(|(_, y)| *y).collect();
    let (x_min, x_max) = value_bounds(&xs).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = value_bounds(&ys).unwrap_or((0.0, 1.0));

    let datasets = vec![Dataset::default()
        .name(title.to_owned())
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(colors.highlight))
        .data(data)];

    let chart = Chart::new(datasets)
        .block(chart_block(title, &colors))
        .x_axis(
            Axis::default()
                .title(x_title.to_owned())
                .style(Style::default().fg(colors.dim))
                .bounds(padded_bounds(x_min, x_max))
                .labels(vec![
                    Span::raw(format!("{x_min:.0}")),
                    Span::raw(format!("{:.0}", f64::midpoint(x_min, x_max))),
                    Span::raw(format!("{x_max:.0}")),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(y_title.to_owned())
                .style(Style::default().fg(colors.dim))
                .bounds(padded_bounds(y_min, y_max))
                .labels(vec![
                    Span::raw(format!("{y_min:.0}")),
                    Span::raw(format!("{:.0}", f64::midpoint(y_min, y_max))),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_chart(
    f: &mut Frame<'_>,
    area: Rect,
    colors: &Palette,
    title: &str,
    datasets: Vec<Dataset<'_>>,
    series: &[&[(f64, f64)]],
    x_labels: Vec<String>,
) {
    let xs: Vec<f64> = series.iter().flat_map(|s| s.iter().map(|(x, _)| *x)).collect();
    let ys: Vec<f64> = series.iter().flat_map(|s| s.iter().map(|(_, y)| *y)).collect();
    let (x_min, x_max) = value_bounds(&xs).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = value_bounds(&ys).unwrap_or((0.0, 1.0));

    let chart = Chart::new(datasets)
        .block(chart_block(title, colors))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(colors.dim))
                .bounds([x_min, x_max.max(x_min + 1.0)])
                .labels(x_labels.into_iter().map(Span::raw).collect::<Vec<_>>()),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(colors.dim))
                .bounds(padded_bounds(y_min.min(0.0), y_max))
                .labels(vec![
                    Span::raw(format!("{:.0}", y_min.min(0.0))),
                    Span::raw(format!("{:.0}", f64::midpoint(y_min.min(0.0), y_max))),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );

    f.render_widget(chart, area);
}

fn padded_bounds(min: f64, max: f64) -> [f64; 2] {
    if max > min {
        let pad = (max - min) * 0.05;
        [min - pad, max + pad]
    } else {
        [min - 1.0, max + 1.0]
    }
}

fn bar_width_for(area: Rect, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let available = area.width.saturating_sub(2);
    (available / bars as u16).saturating_sub(1).clamp(3, 9)
}

fn truncated(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        label.to_owned()
    } else {
        let cut: String = label.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

#[cfg(test)]
mod tests {
    use super::truncated;

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncated("HURTO", 10), "HURTO");
        assert_eq!(truncated("EXTORSIÓN Y SECUESTRO", 10), "EXTORSIÓN…");
    }
}
