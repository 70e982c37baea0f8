use crossterm::event::KeyCode;

use crate::app::state::App;

pub fn handle(app: &mut App, key: KeyCode) {
    let changed = match key {
        KeyCode::Up => app.dashboard.selection.prev_year(),
        KeyCode::Down => app.dashboard.selection.next_year(),
        _ => false,
    };
    if changed {
        app.selection_changed();
    }
}
