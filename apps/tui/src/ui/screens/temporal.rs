use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Paragraph, Tabs};
use ratatui::Frame;

use crate::app::fetch::ChartKey;
use crate::app::App;
use crate::chart::{bar_data, monthly_bar_data, series_data};
use crate::domain::TemporalTab;
use crate::ui::screens::selector_line;
use crate::ui::theme::palette;
use crate::ui::widgets::charts;

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Percentage(55),
            Constraint::Min(6),
        ])
        .split(area);

    let selection = &app.temporal.selection;
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

    let titles: Vec<&str> = TemporalTab::ALL.iter().map(|t| t.label()).collect();
    let tabs = Tabs::new(titles)
        .select(app.temporal.tab.index())
        .style(Style::default().fg(colors.dim))
        .highlight_style(Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, rows[1]);

    match app.temporal.tab {
        // Monthly rows carry the month as a number; the abbreviation is
        // derived here.
        TemporalTab::Mensual => charts::render_bar_chart(
            f,
            rows[2],
            app,
            ChartKey::TemporalMensual,
            "Delitos por mes",
            &monthly_bar_data(&app.temporal.mensual, "mes", "total"),
        ),
        TemporalTab::Anual => {
            let anual = series_data(&app.temporal.anual, "anio", "total");
            let labels: Vec<String> = match (anual.first(), anual.last()) {
                (Some((a, _)), Some((b, _))) => {
                    vec![format!("{a:.0}"), format!("{:.0}", f64::midpoint(*a, *b)), format!("{b:.0}")]
                }
                _ => Vec::new(),
            };
            charts::render_line_series(
                f,
                rows[2],
                app,
                ChartKey::TemporalAnual,
                "Evolución anual",
                "Delitos",
                &anual,
                labels,
            );
        }
        TemporalTab::DiaSemana => charts::render_bar_chart(
            f,
            rows[2],
            app,
            ChartKey::TemporalDiaSemana,
            "Delitos por día de la semana",
            &bar_data(&app.temporal.dia_semana, "dia", "total"),
        ),
        TemporalTab::Modalidad => charts::render_ranking_bars(
            f,
            rows[2],
            app,
            ChartKey::TemporalModalidad,
            "Modalidades más frecuentes",
            &bar_data(&app.temporal.modalidad, "modalidad", "total"),
        ),
    }

    let semanal = series_data(&app.temporal.semanal, "semana", "total");
    let labels: Vec<String> = match (semanal.first(), semanal.last()) {
        (Some((a, _)), Some((b, _))) => {
            vec![
                format!("Sem {a:.0}"),
                format!("Sem {:.0}", f64::midpoint(*a, *b)),
                format!("Sem {b:.0}"),
            ]
        }
        _ => Vec::new(),
    };
    charts::render_line_series(
        f,
        rows[3],
        app,
        ChartKey::TemporalSemanal,
        "Tendencia semanal",
        "Delitos",
        &semanal,
        labels,
    );
}
