use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::ui::theme::palette;
use crate::ui::widgets::charts::chart_block;

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(halves[0]);

    render_transcript(app, f, left[0]);
    render_input(app, f, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(5)])
        .split(halves[1]);
    render_suggestions(app, f, right[0]);
    render_capacidades(app, f, right[1]);
}

fn render_transcript(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let chat = &app.chatbot.chat;
    let block = chart_block("Asistente", &colors);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines: Vec<TextLine<'_>> = Vec::new();
    for message in &chat.messages {
        let (prefix, color) = if message.from_bot {
            ("Asistente: ", colors.accent)
        } else {
            ("Tú: ", colors.highlight)
        };
        lines.push(TextLine::from(vec![
            Span::styled(prefix, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::styled(chat.visible_text(message), Style::default().fg(colors.text)),
        ]));
        if let Some(tipo) = message.tipo_consulta.as_deref() {
            lines.push(TextLine::from(Span::styled(
                format!("  [{tipo}]"),
                Style::default().fg(colors.dim),
            )));
        }
        lines.push(TextLine::default());
    }
    if chat.waiting {
        lines.push(TextLine::from(Span::styled(
            "Asistente está escribiendo...",
            Style::default().fg(colors.dim).add_modifier(Modifier::ITALIC),
        )));
    }

    // Keep the tail of the conversation in view.
    let visible = usize::from(inner.height);
    let scroll = lines.len().saturating_sub(visible) as u16;
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).scroll((scroll, 0)),
        inner,
    );
}

fn render_input(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let chat = &app.chatbot.chat;
    let title = if chat.insert_mode {
        "Pregunta (Esc para salir, Enter para enviar)"
    } else {
        "Pregunta (i para escribir)"
    };
    let mut spans = vec![Span::styled(
        chat.input.clone(),
        Style::default().fg(colors.text),
    )];
    if chat.insert_mode {
        spans.push(Span::styled("▌", Style::default().fg(colors.highlight)));
    }
    f.render_widget(
        Paragraph::new(TextLine::from(spans)).block(chart_block(title, &colors)),
        area,
    );
}

fn render_suggestions(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let shortcuts = ['a', 'b', 'c', 'd'];
    let lines: Vec<TextLine<'_>> = app
        .chatbot
        .sugerencias
        .iter()
        .zip(shortcuts)
        .map(|(sugerencia, shortcut)| {
            TextLine::from(vec![
                Span::styled(
                    format!("[{shortcut}] "),
                    Style::default().fg(colors.highlight),
                ),
                Span::styled(sugerencia.clone(), Style::default().fg(colors.text)),
            ])
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(chart_block("Sugerencias", &colors)),
        area,
    );
}

fn render_capacidades(app: &App, f: &mut Frame<'_>, area: Rect) {
    let colors = palette(app.theme);
    let mut lines: Vec<TextLine<'_>> = Vec::new();
    for (nombre, capacidad) in &app.chatbot.capacidades {
        lines.push(TextLine::from(Span::styled(
            nombre.clone(),
            Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
        )));
        if let Some(descripcion) = capacidad.descripcion.as_deref() {
            lines.push(TextLine::from(Span::styled(
                format!("  {descripcion}"),
                Style::default().fg(colors.dim),
            )));
        }
    }
    if lines.is_empty() {
        lines.push(TextLine::from(Span::styled(
            "Capacidades no disponibles",
            Style::default().fg(colors.dim),
        )));
    }
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(chart_block("Capacidades", &colors)),
        area,
    );
}
