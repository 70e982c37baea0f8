use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{bar_data, donut_slices, format_opt_number, series_data};
use crate::ui::screens::selector_line;
use crate::ui::theme::palette;
use crate::ui::widgets::charts;
use crate::ui::widgets::tables::render_stat_cards;

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(8),
        ])
        .split(area);

    let selection = &app.dashboard.selection;
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

    render_stats(app, f, rows[1]);

    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(halves[1]);

    let anual = series_data(&app.dashboard.anual, "anio", "total");
    let year_labels: Vec<String> = match (anual.first(), anual.last()) {
        (Some((first, _)), Some((last, _))) => {
            vec![
                format!("{first:.0}"),
                format!("{:.0}", f64::midpoint(*first, *last)),
                format!("{last:.0}"),
            ]
        }
        _ => Vec::new(),
    };
    charts::render_line_series(
        f,
        top[0],
        app,
        ChartKey::DashboardAnual,
        "Evolución anual",
        "Delitos",
        &anual,
        year_labels,
    );

    charts::render_bar_chart(
        f,
        top[1],
        app,
        ChartKey::DashboardDiaSemana,
        "Delitos por día de la semana",
        &bar_data(&app.dashboard.dia_semana, "dia", "total"),
    );

    charts::render_donut(
        f,
        bottom[0],
        app,
        ChartKey::DashboardGenero,
        "Distribución por género",
        &donut_slices(&app.dashboard.genero, "genero", "total"),
    );

    charts::render_donut(
        f,
        bottom[1],
        app,
        ChartKey::DashboardZona,
        "Distribución por zona",
        &donut_slices(&app.dashboard.zona, "zona", "total"),
    );
}

fn render_stats(app: &App, f: &mut Frame<'_>, area: Rect) {
    if app.is_loading(ChartKey::DashboardStats) {
        charts::render_loading(f, area, app, "Estadísticas generales");
        return;
    }
    let stats = app.dashboard.stats.as_ref();
    let rango = stats.map_or_else(
        || "—".to_owned(),
        |s| match (&s.fecha_inicio, &s.fecha_fin) {
            (Some(inicio), Some(fin)) => format!("{inicio} a {fin}"),
            _ => "—".to_owned(),
        },
    );
    let cards = [
        (
            "Total de eventos",
            format_opt_number(stats.and_then(|s| s.total_eventos)),
        ),
        (
            "Municipios",
            format_opt_number(stats.and_then(|s| s.municipios_cubiertos)),
        ),
        (
            "Categorías",
            stats.map_or_else(|| "—".to_owned(), |s| {
                s.categorias_disponibles.len().to_string()
            }),
        ),
        ("Rango de fechas", rango),
    ];
    render_stat_cards(f, area, app, &cards);
}
