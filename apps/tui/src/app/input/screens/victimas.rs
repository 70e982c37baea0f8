use crossterm::event::KeyCode;

use crate::app::state::App;

pub fn handle(app: &mut App, key: KeyCode) {
    let changed = match key {
        KeyCode::Up => app.victimas.selection.prev_year(),
        KeyCode::Down => app.victimas.selection.next_year(),
        KeyCode::Char('c') => app.victimas.selection.next_category(),
        KeyCode::Char('C') => app.victimas.selection.prev_category(),
        _ => false,
    };
    if changed {
        app.selection_changed();
    }
}
