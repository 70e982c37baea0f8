use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{bar_data, edge_labels, num, series_data};
use crate::ui::screens::selector_line;
use crate::ui::theme::palette;
use crate::ui::widgets::charts;
use crate::ui::widgets::tables::{render_correlacion, render_precipitacion};

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(40),
            Constraint::Percentage(35),
            Constraint::Min(5),
        ])
        .split(area);

    let selection = &app.clima.selection;
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
                ("Categoría", app.clima.categoria()),
            ],
        )),
        rows[0],
    );

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    charts::render_scatter(
        f,
        top[0],
        app,
        ChartKey::ClimaScatter,
        "Lluvia vs delitos por día",
        "Precipitación (mm)",
        "Delitos",
        &series_data(&app.clima.scatter, "precipitacion_mm", "total_delitos"),
    );

    charts::render_bar_chart(
        f,
        top[1],
        app,
        ChartKey::ClimaBarras,
        "Promedio de delitos por categoría de lluvia",
        &bar_data(&app.clima.barras, "categoria_lluvia", "promedio_delitos_dia"),
    );

    render_linea_superpuesta(app, f, rows[2]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[3]);
    render_correlacion(
        f,
        cards[0],
        app,
        ChartKey::ClimaCorrelacion,
        app.clima.correlacion.as_ref(),
    );
    render_precipitacion(
        f,
        cards[1],
        app,
        ChartKey::ClimaPrecipitacion,
        app.clima.precipitacion.as_ref(),
    );
}

/// Monthly crime and precipitation lines on a shared x axis; the periods
/// arrive ordered, so the row index works as the x value.
fn render_linea_superpuesta(app: &App, f: &mut Frame<'_>, area: Rect) {
    let delitos: Vec<(f64, f64)> = app
        .clima
        .linea
        .iter()
        .enumerate()
        .filter_map(|(i, r)| Some((i as f64, num(r, "total_delitos")?)))
        .collect();
    let lluvia: Vec<(f64, f64)> = app
        .clima
        .linea
        .iter()
        .enumerate()
        .filter_map(|(i, r)| Some((i as f64, num(r, "precipitacion_total")?)))
        .collect();

    // Rows carry the period as an ISO-like string; label the axis ends
    // with it directly.
    let labels = edge_labels(&app.clima.linea, "periodo");

    charts::render_two_lines(
        f,
        area,
        app,
        ChartKey::ClimaLinea,
        "Delitos y precipitación en el tiempo",
        ("Delitos", &delitos),
        ("Precipitación (mm)", &lluvia),
        labels,
    );
}
