//! One module per page; `render` dispatches on the active page.

mod chatbot;
mod clima;
mod dashboard;
mod geografia;
mod predicciones;
mod temporal;
mod victimas;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::Frame;

use crate::app::App;
use crate::domain::Page;
use crate::ui::theme::Palette;

pub fn render(app: &App, f: &mut Frame<'_>, area: Rect) {
    match app.page {
        Page::Dashboard => dashboard::render(app, f, area),
        Page::Geografia => geografia::render(app, f, area),
        Page::Temporal => temporal::render(app, f, area),
        Page::Victimas => victimas::render(app, f, area),
        Page::Clima => clima::render(app, f, area),
        Page::Chatbot => chatbot::render(app, f, area),
        Page::Predicciones => predicciones::render(app, f, area),
    }
}

/// Single-line filter readout shared by the pages with selectors.
fn selector_line<'a>(colors: &Palette, parts: &[(&'a str, String)]) -> TextLine<'a> {
    let mut spans: Vec<Span<'a>> = Vec::new();
    for (i, (label, value)) in parts.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  │  ", Style::default().fg(colors.dim)));
        }
        spans.push(Span::styled(
            format!("{label}: "),
            Style::default().fg(colors.dim),
        ));
        spans.push(Span::styled(
            value.clone(),
            Style::default().fg(colors.highlight).add_modifier(Modifier::BOLD),
        ));
    }
    TextLine::from(spans)
}
