use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::api::models::PuntoSerie;
use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::month_abbr;
use crate::ui::screens::selector_line;
use crate::ui::theme::palette;
use crate::ui::widgets::charts;
use crate::ui::widgets::tables::{render_alertas, render_comparativa, render_prediccion_ranking};

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Percentage(45),
            Constraint::Min(8),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(selector_line(
            &colors,
            &[
                ("Municipio", app.predicciones.municipio()),
                ("Categoría", app.predicciones.selection.category_label()),
            ],
        )),
        rows[0],
    );

    render_serie(app, f, rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[2]);

    render_comparativa(
        f,
        bottom[0],
        app,
        ChartKey::PrediccionesComparativa,
        "Predicción vs promedio histórico",
        &app.predicciones.comparativa,
    );
    render_alertas(
        f,
        bottom[1],
        app,
        ChartKey::PrediccionesAlertas,
        &app.predicciones.alertas,
    );
    render_prediccion_ranking(
        f,
        bottom[2],
        app,
        ChartKey::PrediccionesResumen,
        "Municipios con mayor predicción",
        &app.predicciones.resumen,
    );
}

/// Historical and predicted segments of the monthly series, the predicted
/// one restyled and joined at the boundary so the line reads continuous.
fn render_serie(app: &App, f: &mut Frame<'_>, area: Rect) {
    let serie = &app.predicciones.serie;

    let mut historico: Vec<(f64, f64)> = Vec::new();
    let mut prediccion: Vec<(f64, f64)> = Vec::new();
    for (i, punto) in serie.iter().enumerate() {
        let pair = (i as f64, punto.total_delitos);
        if punto.es_prediccion {
            if prediccion.is_empty() {
                if let Some(last) = historico.last() {
                    prediccion.push(*last);
                }
            }
            prediccion.push(pair);
        } else {
            historico.push(pair);
        }
    }

    let label = |p: &PuntoSerie| format!("{} {}", month_abbr(i64::from(p.mes)), p.anio);
    let labels: Vec<String> = match (serie.first(), serie.last()) {
        (Some(first), Some(last)) => vec![label(first), label(last)],
        _ => Vec::new(),
    };

    charts::render_two_lines(
        f,
        area,
        app,
        ChartKey::PrediccionesSerie,
        &format!("Serie mensual de {}", app.predicciones.municipio()),
        ("Histórico", &historico),
        ("Predicción", &prediccion),
        labels,
    );
}
