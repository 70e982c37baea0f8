use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{bar_data, donut_slices, pivot_genero_por_delito};
use crate::ui::screens::selector_line;
use crate::ui::theme::palette;
use crate::ui::widgets::charts;
use crate::ui::widgets::maps::render_heatmap;

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
            Constraint::Min(6),
        ])
        .split(area);

    let selection = &app.victimas.selection;
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
            ],
        )),
        rows[0],
    );

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);

    charts::render_donut(
        f,
        top[0],
        app,
        ChartKey::VictimasGenero,
        "Víctimas por género",
        &donut_slices(&app.victimas.genero, "genero", "total"),
    );

    charts::render_bar_chart(
        f,
        top[1],
        app,
        ChartKey::VictimasEtario,
        "Víctimas por grupo etario",
        &bar_data(&app.victimas.etario, "grupo_etario", "total"),
    );

    charts::render_ranking_bars(
        f,
        middle[0],
        app,
        ChartKey::VictimasArma,
        "Armas y medios más frecuentes",
        &bar_data(&app.victimas.arma, "arma_medio", "total"),
    );

    charts::render_ranking_bars(
        f,
        middle[1],
        app,
        ChartKey::VictimasSitio,
        "Clases de sitio más frecuentes",
        &bar_data(&app.victimas.sitio, "clase_sitio", "total"),
    );

    charts::render_grouped_bars(
        f,
        bottom[0],
        app,
        ChartKey::VictimasGeneroDelito,
        "Género por tipo de delito",
        ("Fem", "Mas"),
        &pivot_genero_por_delito(&app.victimas.genero_delito),
    );

    render_heatmap(
        f,
        bottom[1],
        app,
        ChartKey::VictimasPuntos,
        "Mapa de calor de eventos",
        app.victimas.puntos.as_ref(),
    );
}
