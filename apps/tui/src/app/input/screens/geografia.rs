use crossterm::event::KeyCode;

use crate::app::state::App;

pub fn handle(app: &mut App, key: KeyCode) {
    let changed = match key {
        KeyCode::Up => app.geografia.selection.prev_year(),
        KeyCode::Down => app.geografia.selection.next_year(),
        KeyCode::Char('c') => app.geografia.selection.next_category(),
        KeyCode::Char('C') => app.geografia.selection.prev_category(),
        KeyCode::Char('m') => {
            app.geografia.view = app.geografia.view.toggled();
            true
        }
        _ => false,
    };
    if changed {
        app.selection_changed();
    }
}
