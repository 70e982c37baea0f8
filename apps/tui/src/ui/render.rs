//! Top-level layout: tab bar, active page, status line and shortcut hints,
//! with a help overlay replacing the page content while open.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::domain::Page;
use crate::ui::screens;
use crate::ui::theme::{palette, Palette};

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let colors = palette(app.theme);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_tabs(app, f, rows[0], &colors);

    if app.show_help {
        render_help(f, rows[1], &colors);
    } else {
        screens::render(app, f, rows[1]);
    }

    render_status(app, f, rows[2], &colors);
    render_shortcuts(app, f, rows[3], &colors);
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect, colors: &Palette) {
    let titles: Vec<String> = Page::ALL
        .iter()
        .enumerate()
        .map(|(i, page)| format!("{} {}", i + 1, page.label()))
        .collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title("Atlas al Crimen de Santander")
                .title_bottom(TextLine::from(Span::styled(
                    format!(" {} ", app.page.title()),
                    Style::default().fg(colors.dim),
                )))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.accent)),
        )
        .select(app.page.index())
        .style(Style::default().fg(colors.dim))
        .highlight_style(Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, area);
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect, colors: &Palette) {
    let is_error = app.status_message.starts_with("Error");
    let style = if is_error {
        Style::default().fg(colors.error)
    } else {
        Style::default().fg(colors.text)
    };
    let mut spans = vec![Span::styled(app.status_message.clone(), style)];
    if app.any_loading() {
        spans.push(Span::styled(
            format!("  ({} consultas en curso)", app.pending.len()),
            Style::default().fg(colors.dim),
        ));
    }
    if app.debug {
        spans.push(Span::styled(
            format!("  [gen {}]", app.generation),
            Style::default().fg(colors.dim),
        ));
    }
    let paragraph = Paragraph::new(TextLine::from(spans)).block(
        Block::default()
            .title("Estado")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if is_error { colors.error } else { colors.accent })),
    );
    f.render_widget(paragraph, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect, colors: &Palette) {
    let page_hint = match app.page {
        Page::Dashboard | Page::Victimas => "↑/↓ año · c/C categoría",
        Page::Geografia => "↑/↓ año · c/C categoría · m métrica",
        Page::Temporal => "↑/↓ año · c/C categoría · Tab pestaña",
        Page::Clima => "↑/↓ año · c/C categoría",
        Page::Chatbot => "i escribir · Enter enviar · a-d sugerencias",
        Page::Predicciones => "↑/↓ municipio · c/C categoría",
    };
    let line = TextLine::from(vec![
        Span::styled(page_hint, Style::default().fg(colors.highlight)),
        Span::styled(
            "  │  q salir · 1-7/←/→ páginas · t tema · r actualizar · ? ayuda",
            Style::default().fg(colors.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_help(f: &mut Frame<'_>, area: Rect, colors: &Palette) {
    let entry = |key: &'static str, what: &'static str| {
        TextLine::from(vec![
            Span::styled(format!("  {key:<12}"), Style::default().fg(colors.highlight)),
            Span::styled(what, Style::default().fg(colors.text)),
        ])
    };
    let section = |title: &'static str| {
        TextLine::from(Span::styled(
            title,
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        ))
    };

    let lines = vec![
        section("Navegación"),
        entry("1-7", "ir a una página"),
        entry("←/→", "página anterior / siguiente"),
        entry("q, Esc", "salir"),
        TextLine::default(),
        section("Filtros"),
        entry("↑/↓", "cambiar año (municipio en Predicciones)"),
        entry("c / C", "categoría siguiente / anterior"),
        entry("m", "alternar total y tasa por 100k (Geografía)"),
        entry("Tab", "cambiar pestaña (Temporal)"),
        entry("r", "recargar la página actual"),
        TextLine::default(),
        section("Chatbot"),
        entry("i", "modo escritura"),
        entry("Enter", "enviar la pregunta"),
        entry("a-d", "enviar una sugerencia"),
        entry("Esc", "salir del modo escritura"),
        TextLine::default(),
        section("Apariencia"),
        entry("t", "alternar tema oscuro / claro"),
        entry("?", "cerrar esta ayuda"),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .title("Ayuda")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.accent)),
        );
    f.render_widget(paragraph, area);
}
