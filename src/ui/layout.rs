//! Layout components (card placement, status bar)

use crate::app::{App, Screen};
use crate::platform::{shortcut_hint, sign_up_hint, QUIT_SHORTCUT};
use crate::state::SubmissionState;
use crate::ui::theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout: content above a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Center a `width` x `height` card in `area`, displaced by a shake and the entrance slide
pub fn card_rect(area: Rect, width: u16, height: u16, x_offset: i16, y_offset: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let base_x = area.x + (area.width - width) / 2;
    let max_x = area.x + area.width - width;
    let x = (base_x as i32 + x_offset as i32).clamp(area.x as i32, max_x as i32) as u16;

    let base_y = area.y + (area.height - height) / 2;
    let max_y = area.y + area.height - height;
    let y = base_y.saturating_add(y_offset).min(max_y);

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn state_color(state: SubmissionState) -> Color {
    match state {
        SubmissionState::Idle => theme::MUTED,
        SubmissionState::Validating | SubmissionState::Submitting => theme::SECONDARY,
        SubmissionState::Succeeded => theme::PRIMARY,
        SubmissionState::Failed => theme::DANGER,
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.controller.state();
    let mut spans = vec![
        Span::styled(" ● ", Style::default().fg(state_color(state))),
        Span::styled(format!("{state}  "), Style::default().fg(Color::White)),
    ];

    // Failure reason wins over the progress message
    if let Some(error) = app.controller.last_error() {
        spans.push(Span::styled(format!("{error}  "), Style::default().fg(theme::DANGER)));
    } else if let Some(msg) = &app.status_message {
        spans.push(Span::styled(format!("{msg}  "), Style::default().fg(theme::PRIMARY)));
    }

    let hints = match (app.in_entrance(), app.screen) {
        (true, _) => "Press any key to skip".to_string(),
        (false, Screen::Login) => shortcut_hint(),
        (false, Screen::Register) => sign_up_hint(),
    };
    spans.push(Span::styled(hints, Style::default().fg(theme::TEXT)));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right
    let quit_hint = format!(" {QUIT_SHORTCUT}:quit ");
    let hint_width = quit_hint.len() as u16;
    if area.width > hint_width {
        let quit_area = Rect {
            x: area.x + area.width - hint_width,
            width: hint_width,
            ..area
        };
        let quit_widget =
            Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
        frame.render_widget(quit_widget, quit_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_centered() {
        let area = Rect::new(0, 0, 100, 40);
        let card = card_rect(area, 50, 20, 0, 0);
        assert_eq!(card, Rect::new(25, 10, 50, 20));
    }

    #[test]
    fn test_card_offsets_clamped_to_area() {
        let area = Rect::new(0, 0, 52, 22);
        let card = card_rect(area, 50, 20, -5, 10);
        assert_eq!(card.x, 0);
        assert_eq!(card.y, 2);
    }

    #[test]
    fn test_card_shrinks_to_small_area() {
        let area = Rect::new(0, 0, 30, 10);
        let card = card_rect(area, 50, 20, 2, 0);
        assert_eq!(card, area);
    }
}
