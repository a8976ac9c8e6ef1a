//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod login;
mod register;
mod theme;

use crate::app::{App, Screen};
use ratatui::{style::Style, widgets::Block, Frame};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(theme::SURFACE)), area);

    let (content_area, status_area) = layout::create_layout(area);

    match app.screen {
        Screen::Login => login::draw(frame, content_area, app),
        Screen::Register => register::draw(frame, content_area, &app.registration),
    }
    components::render_toasts(frame, content_area, &app.notifications.visible());

    layout::draw_status_bar(frame, status_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginConfig;
    use crate::controller::EMAIL_FIELD;
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        let config = LoginConfig {
            log_attempts: Some(false),
            ..Default::default()
        };
        App::new(&config).unwrap()
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 32)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_login_card() {
        let mut app = test_app();
        app.skip_entrance();
        let screen = render(&app);

        assert!(screen.contains("NEON ACCESS"));
        assert!(screen.contains("Sign In"));
        assert!(screen.contains("Remember me"));
        assert!(screen.contains("Google"));
        assert!(screen.contains("Ctrl+C:quit"));
    }

    #[test]
    fn test_draw_hides_card_before_entrance() {
        let app = test_app();
        let screen = render(&app);

        assert!(!screen.contains("Sign In"));
        assert!(screen.contains("Press any key to skip"));
    }

    #[test]
    fn test_draw_masks_password_and_shows_errors() {
        let mut app = test_app();
        app.skip_entrance();
        for c in "bad".chars() {
            app.controller.input_char(EMAIL_FIELD, c);
        }
        app.controller.focus_next();
        for c in "secret".chars() {
            app.controller.input_char("password", c);
        }
        let screen = render(&app);

        assert!(screen.contains("Please enter a valid email address"));
        assert!(!screen.contains("secret"));
        assert!(screen.contains("••••••"));
    }

    #[test]
    fn test_draw_toast() {
        let mut app = test_app();
        app.skip_entrance();
        app.controller.forgot_password();
        let screen = render(&app);

        assert!(screen.contains("Password reset"));
    }

    #[test]
    fn test_draw_sign_up_card() {
        let mut app = test_app();
        app.skip_entrance();
        app.screen = Screen::Register;
        let screen = render(&app);

        assert!(screen.contains("Create Account"));
        assert!(screen.contains("Confirm password"));
        assert!(screen.contains("Esc:back"));
        assert!(!screen.contains("Remember me"));
    }

    #[test]
    fn test_draw_failure_in_status_bar() {
        let config = LoginConfig {
            log_attempts: Some(false),
            notification_ttl_ms: Some(0),
            ..Default::default()
        };
        let mut app = App::new(&config).unwrap();
        app.skip_entrance();
        for c in "a@b.com".chars() {
            app.controller.input_char(EMAIL_FIELD, c);
        }
        for c in "validPass1".chars() {
            app.controller.input_char("password", c);
        }
        app.controller.submit();
        app.controller.cancel_submission();
        app.notifications.prune(std::time::Instant::now());
        let screen = render(&app);

        assert!(screen.contains("Sign-in cancelled"));
    }

    #[test]
    fn test_draw_small_terminal_does_not_panic() {
        let mut app = test_app();
        app.skip_entrance();
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal.draw(|frame| draw(frame, &app)).unwrap();
    }
}
