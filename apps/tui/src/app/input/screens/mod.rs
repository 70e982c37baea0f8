pub mod chatbot;
pub mod clima;
pub mod dashboard;
pub mod geografia;
pub mod predicciones;
pub mod temporal;
pub mod victimas;

use crossterm::event::KeyCode;

use crate::app::state::App;
use crate::domain::Page;

pub fn dispatch(app: &mut App, key: KeyCode) {
    match app.page {
        Page::Dashboard => dashboard::handle(app, key),
        Page::Geografia => geografia::handle(app, key),
        Page::Temporal => temporal::handle(app, key),
        Page::Victimas => victimas::handle(app, key),
        Page::Clima => clima::handle(app, key),
        Page::Chatbot => chatbot::handle(app, key),
        Page::Predicciones => predicciones::handle(app, key),
    }
}
