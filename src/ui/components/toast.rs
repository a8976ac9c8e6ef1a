//! Toast overlay for notifications

use crate::state::Notification;
use crate::ui::theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Maximum width of a toast
const MAX_WIDTH: u16 = 44;

/// Render toasts stacked from the top-right corner of `area`, newest on top
pub fn render_toasts(frame: &mut Frame, area: Rect, notifications: &[Notification]) {
    let padding = 2u16; // 1 char padding on each side
    let max_line_width = MAX_WIDTH.saturating_sub(padding + 2) as usize;
    let mut y = area.y + 1;

    for notification in notifications.iter().rev() {
        let wrapped_lines = wrap_text(&notification.message, max_line_width);
        let content_width = wrapped_lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as u16;
        let width = (content_width + padding + 2).min(MAX_WIDTH).min(area.width);
        let height = wrapped_lines.len() as u16 + 2;

        if y + height > area.y + area.height {
            break;
        }

        let toast_area = Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y,
            width,
            height,
        };
        y += height;

        let color = theme::severity_color(notification.severity);
        let lines: Vec<Line> = wrapped_lines
            .into_iter()
            .map(|l| Line::from(Span::styled(format!(" {l}"), Style::default().fg(theme::TEXT))))
            .collect();

        frame.render_widget(Clear, toast_area);
        let toast = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(Span::styled(
                    format!(" {} ", notification.form.name),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(theme::SURFACE)),
        );
        frame.render_widget(toast, toast_area);
    }
}

/// Wrap text to fit within a maximum width
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.chars().count() + word.chars().count() + 1 > max_width
                && !current_line.is_empty()
            {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_words() {
        let lines = wrap_text("Password reset link would be sent to your email", 20);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
        assert_eq!(lines.join(" "), "Password reset link would be sent to your email");
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
