use crossterm::event::KeyCode;

use crate::app::state::App;

pub fn handle(app: &mut App, key: KeyCode) {
    // Tab switching is local: every tab's data arrived in the same batch.
    if key == KeyCode::Tab {
        app.temporal.tab = app.temporal.tab.next();
        return;
    }
    let changed = match key {
        KeyCode::Up => app.temporal.selection.prev_year(),
        KeyCode::Down => app.temporal.selection.next_year(),
        KeyCode::Char('c') => app.temporal.selection.next_category(),
        KeyCode::Char('C') => app.temporal.selection.prev_category(),
        _ => false,
    };
    if changed {
        app.selection_changed();
    }
}
