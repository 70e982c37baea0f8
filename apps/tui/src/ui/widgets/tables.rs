//! Card and table widgets: the dashboard stat cards, the climate summary
//! cards and the prediction tables.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::api::models::{Alerta, ComparativaMes, Correlacion, PrediccionMunicipio, ResumenPrecipitacion};
use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{format_number, format_percent, month_abbr};
use crate::ui::theme::palette;
use crate::ui::widgets::charts::{chart_block, render_empty, render_loading};

/// One row of equally sized stat cards.
pub fn render_stat_cards(f: &mut Frame<'_>, area: Rect, app: &App, cards: &[(&str, String)]) {
    if cards.is_empty() {
        return;
    }
    let colors = palette(app.theme);
    let constraints: Vec<Constraint> = cards
        .iter()
        .map(|_| Constraint::Ratio(1, cards.len() as u32))
        .collect();
    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (slot, (title, value)) in slots.iter().zip(cards) {
        let card = Paragraph::new(TextLine::from(Span::styled(
            value.clone(),
            Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD),
        )))
        .block(chart_block(title, &colors))
        .alignment(Alignment::Center);
        f.render_widget(card, *slot);
    }
}

/// Pearson coefficient with its interpretation, or the backend's message
/// when there were not enough observations.
pub fn render_correlacion(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    correlacion: Option<&Correlacion>,
) {
    let title = "Correlación lluvia-delitos";
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    let Some(correlacion) = correlacion else {
        render_empty(f, area, app, title);
        return;
    };
    let colors = palette(app.theme);

    let lines = match correlacion.correlacion_pearson {
        Some(pearson) => vec![
            TextLine::from(vec![
                Span::styled("Pearson: ", Style::default().fg(colors.dim)),
                Span::styled(
                    format!("{pearson:.3}"),
                    Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD),
                ),
            ]),
            TextLine::from(Span::styled(
                correlacion.interpretacion.clone().unwrap_or_default(),
                Style::default().fg(colors.text),
            )),
            TextLine::from(Span::styled(
                format!(
                    "n = {}",
                    correlacion
                        .n_observaciones
                        .map_or_else(|| "—".to_owned(), |n| format_number(n as f64))
                ),
                Style::default().fg(colors.dim),
            )),
        ],
        None => vec![TextLine::from(Span::styled(
            correlacion
                .mensaje
                .clone()
                .unwrap_or_else(|| "Sin datos suficientes".to_owned()),
            Style::default().fg(colors.dim),
        ))],
    };

    f.render_widget(Paragraph::new(lines).block(chart_block(title, &colors)), area);
}

pub fn render_precipitacion(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    resumen: Option<&ResumenPrecipitacion>,
) {
    let title = "Resumen de precipitación";
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    let Some(resumen) = resumen else {
        render_empty(f, area, app, title);
        return;
    };
    let colors = palette(app.theme);

    let stat = |label: &str, value: String| {
        TextLine::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(colors.dim)),
            Span::styled(value, Style::default().fg(colors.text)),
        ])
    };
    let int = |v: Option<i64>| v.map_or_else(|| "—".to_owned(), |n| format_number(n as f64));
    let mm = |v: Option<f64>| v.map_or_else(|| "—".to_owned(), |n| format!("{n:.1} mm"));

    let lines = vec![
        stat("Días con registro", int(resumen.dias_con_registro)),
        stat("Días secos", int(resumen.dias_secos)),
        stat("Días con lluvia", int(resumen.dias_con_lluvia)),
        stat("Promedio", mm(resumen.precipitacion_promedio_mm)),
        stat("Máxima", mm(resumen.precipitacion_maxima_mm)),
    ];
    f.render_widget(Paragraph::new(lines).block(chart_block(title, &colors)), area);
}

/// Predicted vs historical-average table for one municipality.
pub fn render_comparativa(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    rows: &[ComparativaMes],
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

    let header = Row::new(vec!["Mes", "Predicción", "Promedio", "Cambio"])
        .style(Style::default().fg(colors.accent).add_modifier(Modifier::BOLD));
    let body: Vec<Row<'_>> = rows
        .iter()
        .map(|mes| {
            let trend_color = match mes.tendencia.as_deref() {
                Some("aumento") => colors.error,
                Some("disminucion" | "disminución") => colors.series_b,
                _ => colors.dim,
            };
            Row::new(vec![
                Cell::from(format!("{} {}", month_abbr(i64::from(mes.mes)), mes.anio)),
                Cell::from(format_number(mes.prediccion)),
                Cell::from(format_number(mes.promedio_historico_mes)),
                Cell::from(Span::styled(
                    format!(
                        "{} {}",
                        trend_arrow(mes.tendencia.as_deref()),
                        format_percent(mes.porcentaje_cambio)
                    ),
                    Style::default().fg(trend_color),
                )),
            ])
            .style(Style::default().fg(colors.text))
        })
        .collect();

    let table = Table::new(
        body,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(chart_block(title, &colors));
    f.render_widget(table, area);
}

/// Municipalities whose predicted count exceeds their historical average by
/// more than the alert threshold.
pub fn render_alertas(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    alertas: &[Alerta],
) {
    let title = "Alertas de aumento";
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);
    if alertas.is_empty() {
        let paragraph = Paragraph::new("Sin alertas para los criterios actuales")
            .block(chart_block(title, &colors))
            .style(Style::default().fg(colors.dim))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<TextLine<'_>> = alertas
        .iter()
        .map(|alerta| {
            let level_color = match alerta.nivel_alerta.as_deref() {
                Some("alto" | "ALTO") => colors.error,
                Some("medio" | "MEDIO") => colors.highlight,
                _ => colors.text,
            };
            TextLine::from(vec![
                Span::styled("⚠ ", Style::default().fg(level_color)),
                Span::styled(alerta.municipio.clone(), Style::default().fg(colors.text)),
                Span::styled(
                    format!(
                        "  +{}  ({} previstos)",
                        format_percent(alerta.porcentaje_aumento),
                        alerta
                            .prediccion
                            .map_or_else(|| "—".to_owned(), format_number)
                    ),
                    Style::default().fg(colors.dim),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(chart_block(title, &colors)), area);
}

/// Ranking of municipalities by predicted yearly total.
pub fn render_prediccion_ranking(
    f: &mut Frame<'_>,
    area: Rect,
    app: &App,
    key: ChartKey,
    title: &str,
    predicciones: &[PrediccionMunicipio],
) {
    if app.is_loading(key) {
        render_loading(f, area, app, title);
        return;
    }
    if predicciones.is_empty() {
        render_empty(f, area, app, title);
        return;
    }
    let colors = palette(app.theme);

    let lines: Vec<TextLine<'_>> = predicciones
        .iter()
        .enumerate()
        .map(|(i, p)| {
            TextLine::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(colors.dim)),
                Span::styled(p.municipio.clone(), Style::default().fg(colors.text)),
                Span::styled(
                    format!("  {}", format_number(p.prediccion_delitos)),
                    Style::default().fg(colors.highlight),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines).block(chart_block(title, &colors)), area);
}

fn trend_arrow(tendencia: Option<&str>) -> &'static str {
    match tendencia {
        Some("aumento") => "▲",
        Some("disminucion" | "disminución") => "▼",
        _ => "·"
    }
}

#[cfg(test)]
mod tests {
    use super::trend_arrow;

    #[test]
    fn trend_arrows_cover_both_spellings() {
        assert_eq!(trend_arrow(Some("aumento")), "▲");
        assert_eq!(trend_arrow(Some("disminucion")), "▼");
        assert_eq!(trend_arrow(Some("disminución")), "▼");
        assert_eq!(trend_arrow(None), "·");
    }
}
