pub mod screens;

use crossterm::event::KeyCode;

use crate::app::state::App;
use crate::domain::Page;

/// Routes a key press. Chat insert mode captures everything first; the
/// global keys come next; whatever is left goes to the active page.
pub fn handle_input(app: &mut App, key: KeyCode) {
    if app.page == Page::Chatbot && app.chatbot.chat.insert_mode {
        screens::chatbot::handle_insert(app, key);
        return;
    }
    if app.show_help {
        app.show_help = false;
        return;
    }
    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('t') => app.theme = app.theme.toggled(),
        KeyCode::Char('?') | KeyCode::F(1) => app.show_help = true,
        KeyCode::Char('r') => app.refresh_current_page(),
        KeyCode::Char(digit @ '1'..='7') => {
            if let Some(page) = Page::from_index(digit as usize - '1' as usize) {
                app.enter_page(page);
            }
        }
        KeyCode::Left => {
            let page = app.page.prev();
            app.enter_page(page);
        }
        KeyCode::Right => {
            let page = app.page.next();
            app.enter_page(page);
        }
        _ => screens::dispatch(app, key),
    }
}

#[cfg(test)]
mod tests {
    use super::handle_input;
    use crate::api::ApiClient;
    use crate::app::state::App;
    use crate::config::Config;
    use crate::domain::{Page, Theme};
    use crossterm::event::KeyCode;

    fn test_app() -> App {
        let config = Config {
            api_base_url: "http://localhost:8000/api/v1".to_owned(),
            http_timeout_secs: 5,
            debug: false,
        };
        App::new(ApiClient::new(&config).unwrap(), false)
    }

    #[tokio::test]
    async fn number_keys_switch_pages() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('3'));
        assert_eq!(app.page, Page::Temporal);
        assert!(app.temporal.visited);
        handle_input(&mut app, KeyCode::Char('1'));
        assert_eq!(app.page, Page::Dashboard);
    }

    #[tokio::test]
    async fn arrows_cycle_pages_and_wrap() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Left);
        assert_eq!(app.page, Page::Predicciones);
        handle_input(&mut app, KeyCode::Right);
        assert_eq!(app.page, Page::Dashboard);
    }

    #[test]
    fn theme_toggles_as_state() {
        let mut app = test_app();
        assert_eq!(app.theme, Theme::Dark);
        handle_input(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Light);
        handle_input(&mut app, KeyCode::Char('t'));
        assert_eq!(app.theme, Theme::Dark);
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[tokio::test]
    async fn insert_mode_captures_text_keys() {
        let mut app = test_app();
        handle_input(&mut app, KeyCode::Char('6'));
        assert_eq!(app.page, Page::Chatbot);
        handle_input(&mut app, KeyCode::Char('i'));
        assert!(app.chatbot.chat.insert_mode);
        for c in "hola".chars() {
            handle_input(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.chatbot.chat.input, "hola");
        assert_eq!(app.page, Page::Chatbot);
        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.chatbot.chat.insert_mode);
        assert!(app.running);
    }
}
