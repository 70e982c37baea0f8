use crossterm::event::KeyCode;

use crate::app::state::App;

pub fn handle(app: &mut App, key: KeyCode) {
    let changed = match key {
        KeyCode::Up => app.predicciones.prev_municipio(),
        KeyCode::Down => app.predicciones.next_municipio(),
        KeyCode::Char('c') => app.predicciones.selection.next_category(),
        KeyCode::Char('C') => app.predicciones.selection.prev_category(),
        _ => false,
    };
    if changed {
        app.selection_changed();
    }
}
