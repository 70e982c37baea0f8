use crossterm::event::KeyCode;

use crate::app::state::App;

/// Normal-mode keys on the chatbot page.
pub fn handle(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('i') => app.chatbot.chat.insert_mode = true,
        KeyCode::Enter => app.submit_chat(),
        // One-key shortcuts for the first suggestions.
        KeyCode::Char(letter @ 'a'..='d') => {
            app.submit_suggestion(letter as usize - 'a' as usize);
        }
        _ => {}
    }
}

/// Insert-mode keys: text goes to the input line until Esc.
pub fn handle_insert(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.chatbot.chat.insert_mode = false,
        KeyCode::Enter => app.submit_chat(),
        KeyCode::Backspace => {
            app.chatbot.chat.input.pop();
        }
        KeyCode::Char(c) => app.chatbot.chat.input.push(c),
        _ => {}
    }
}
