//! Canvas-based map renderers for the geography page: a choropleth of
//! municipality polygons and a point heatmap of individual events.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine, Points};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use serde_json::Value;

use crate::api::models::GeoCollection;
use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{color_bucket, format_number, heat_points, num, property_bounds};
use crate::ui::theme::{palette, CHOROPLETH_NEUTRAL, CHOROPLETH_SCALE};
use crate::ui::widgets::charts::{chart_block, render_empty, render_loading};

/// Municipality polygons shaded by the selected metric. Features whose
/// value is missing render in the neutral gray of the scale.
pub fn render_choropleth(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    geo: Option<&GeoCollection>,
    value_field: &str,
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    let Some(geo) = geo.filter(|g| !g.features.is_empty()) else {
        render_empty(f, area, app, title);
        return;
    };
    let colors = palette(app.theme);
    let block = chart_block(title, &colors);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 3 {
        return;
    }

    let Some(bounds) = geometry_bounds(geo) else {
        render_empty(f, area, app, title);
        return;
    };
    let value_bounds = property_bounds(geo, value_field);

    let map_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let legend_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: 1,
        ..inner
    };

    f.render_widget(
        Canvas::default()
            .marker(Marker::Braille)
            .paint(|ctx| {
                for feature in &geo.features {
                    let color = feature_color(&feature.properties, value_field, value_bounds);
                    for ring in polygon_rings(&feature.geometry) {
                        for pair in ring.windows(2) {
                            ctx.draw(&CanvasLine {
                                x1: pair[0].0,
                                y1: pair[0].1,
                                x2: pair[1].0,
                                y2: pair[1].1,
                                color,
                            });
                        }
                    }
                }
            })
            .x_bounds([bounds.0, bounds.2])
            .y_bounds([bounds.1, bounds.3]),
        map_area,
    );

    let legend = match value_bounds {
        Some((min, max)) => TextLine::from(vec![
            Span::styled(format_number(min), Style::default().fg(colors.dim)),
            Span::raw(" "),
            Span::styled("▁", Style::default().fg(CHOROPLETH_SCALE[0])),
            Span::styled("▂", Style::default().fg(CHOROPLETH_SCALE[2])),
            Span::styled("▄", Style::default().fg(CHOROPLETH_SCALE[4])),
            Span::styled("▆", Style::default().fg(CHOROPLETH_SCALE[6])),
            Span::styled("█", Style::default().fg(CHOROPLETH_SCALE[8])),
            Span::raw(" "),
            Span::styled(format_number(max), Style::default().fg(colors.dim)),
        ]),
        None => TextLine::from(Span::styled(
            "Sin valores para la métrica seleccionada",
            Style::default().fg(colors.dim),
        )),
    };
    f.render_widget(Paragraph::new(legend), legend_area);
}

/// Individual event coordinates drawn as a density of points.
pub fn render_heatmap(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    geo: Option<&GeoCollection>,
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    let points: Vec<(f64, f64, f64)> = geo.map(heat_points).unwrap_or_default();
    if points.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);
    let block = chart_block(title, &colors)
        .title_bottom(TextLine::from(Span::styled(
            format!(" {} puntos ", format_number(points.len() as f64)),
            Style::default().fg(colors.dim),
        )));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Points come as (lat, lng, weight); the canvas wants (lng, lat).
    let coords: Vec<(f64, f64)> = points.iter().map(|(lat, lng, _)| (*lng, *lat)).collect();
    let (mut x_min, mut y_min, mut x_max, mut y_max) =
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for (x, y) in &coords {
        x_min = x_min.min(*x);
        x_max = x_max.max(*x);
        y_min = y_min.min(*y);
        y_max = y_max.max(*y);
    }

    f.render_widget(
        Canvas::default()
            .marker(Marker::Dot)
            .paint(|ctx| {
                ctx.draw(&Points {
                    coords: &coords,
                    color: colors.highlight,
                });
            })
            .x_bounds([x_min, x_max.max(x_min + 0.001)])
            .y_bounds([y_min, y_max.max(y_min + 0.001)]),
        inner,
    );
}

fn feature_color(
    properties: &crate::api::models::Record,
    field: &str,
    bounds: Option<(f64, f64)>,
) -> Color {
    match (num(properties, field), bounds) {
        (Some(v), Some((min, max))) => CHOROPLETH_SCALE[color_bucket(v, min, max)],
        _ => CHOROPLETH_NEUTRAL,
    }
}

/// Extract the rings of a GeoJSON Polygon or MultiPolygon geometry as
/// (lng, lat) sequences. Anything else yields no rings.
fn polygon_rings(geometry: &Value) -> Vec<Vec<(f64, f64)>> {
    let Some(kind) = geometry.get("type").and_then(Value::as_str) else {
        return Vec::new();
    };
    let Some(coordinates) = geometry.get("coordinates") else {
        return Vec::new();
    };
    match kind {
        "Polygon" => rings_of(coordinates),
        "MultiPolygon" => coordinates
            .as_array()
            .map(|polygons| polygons.iter().flat_map(rings_of).collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn rings_of(polygon: &Value) -> Vec<Vec<(f64, f64)>> {
    polygon
        .as_array()
        .map(|rings| rings.iter().filter_map(ring_points).collect())
        .unwrap_or_default()
}

fn ring_points(ring: &Value) -> Option<Vec<(f64, f64)>> {
    let points: Vec<(f64, f64)> = ring
        .as_array()?
        .iter()
        .filter_map(|p| {
            let pair = p.as_array()?;
            Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
        })
        .collect();
    (points.len() >= 2).then_some(points)
}

fn geometry_bounds(geo: &GeoCollection) -> Option<(f64, f64, f64, f64)> {
    let (mut x_min, mut y_min, mut x_max, mut y_max) =
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for feature in &geo.features {
        for ring in polygon_rings(&feature.geometry) {
            for (x, y) in ring {
                x_min = x_min.min(x);
                x_max = x_max.max(x);
                y_min = y_min.min(y);
                y_max = y_max.max(y);
            }
        }
    }
    (x_min < x_max && y_min < y_max).then_some((x_min, y_min, x_max, y_max))
}

#[cfg(test)]
mod tests {
    use super::{polygon_rings, ring_points};
    use serde_json::json;

    #[test]
    fn polygon_and_multipolygon_rings_extracted() {
        let polygon = json!({
            "type": "Polygon",
            "coordinates": [[[-73.1, 7.1], [-73.2, 7.2], [-73.3, 7.0], [-73.1, 7.1]]]
        });
        let rings = polygon_rings(&polygon);
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);

        let multi = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[-73.1, 7.1], [-73.2, 7.2], [-73.1, 7.1]]],
                [[[-72.9, 6.9], [-73.0, 7.0], [-72.9, 6.9]]]
            ]
        });
        assert_eq!(polygon_rings(&multi).len(), 2);
    }

    #[test]
    fn unsupported_geometry_yields_nothing() {
        let point = json!({"type": "Point", "coordinates": [-73.1, 7.1]});
        assert!(polygon_rings(&point).is_empty());
    }

    #[test]
    fn degenerate_rings_are_skipped() {
        assert!(ring_points(&json!([[-73.1, 7.1]])).is_none());
        assert!(ring_points(&json!("not a ring")).is_none());
    }
}
