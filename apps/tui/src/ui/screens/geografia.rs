use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::fetch::ChartKey;
use crate::app::state::TOP_RANKING;
use crate::app::App;
use crate::chart::{num, text, top_n};
use crate::ui::screens::selector_line;
use crate::ui::theme::palette;
use crate::ui::widgets::charts::render_ranking_bars;
use crate::ui::widgets::maps::render_choropleth;

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8)])
        .split(area);

    let selection = &app.geografia.selection;
    f.render_widget(
        Paragraph::new(selector_line(
            &colors,
            &[
                (
                    "Año",
                    selection
                        .selected_year()
                        .map_or_else(|| "—".to_owned(), |y| y.to_string()),
                ),
                ("Categoría", selection.category_label()),
                ("Métrica", app.geografia.view.label().to_owned()),
            ],
        )),
        rows[0],
    );

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(rows[1]);

    let value_field = app.geografia.view.value_field();
    render_choropleth(
        f,
        halves[0],
        app,
        ChartKey::GeografiaMapa,
        &format!("Mapa de {}", app.geografia.view.label()),
        app.geografia.geo.as_ref(),
        value_field,
    );

    render_ranking(app, f, halves[1], value_field);
}

fn render_ranking(app: &App, f: &mut Frame<'_>, area: Rect, value_field: &str) {
    let ranking: Vec<(String, u64)> = app
        .geografia
        .geo
        .as_ref()
        .map(|geo| {
            let properties: Vec<_> = geo.features.iter().map(|f| f.properties.clone()).collect();
            top_n(&properties, value_field, TOP_RANKING)
                .iter()
                .filter_map(|p| {
                    let nombre = text(p, "nombre_municipio")?;
                    let valor = num(p, value_field)?;
                    Some((nombre, valor.max(0.0).round() as u64))
                })
                .collect()
        })
        .unwrap_or_default();

    render_ranking_bars(
        f,
        area,
        app,
        ChartKey::GeografiaMapa,
        "Municipios con más casos",
        &ranking,
    );
}
