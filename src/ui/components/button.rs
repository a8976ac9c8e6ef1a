//! Button component for TUI

use crate::ui::theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// How a button should look this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonStyle {
    pub is_selected: bool,
    pub is_enabled: bool,
    /// Pulse or glow colour overriding the border
    pub highlight: Option<Color>,
}

/// Render a bordered button with centered content
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, style: ButtonStyle) {
    let accent = style.highlight.unwrap_or(theme::PRIMARY);

    let border_style = if style.highlight.is_some() || style.is_selected {
        Style::default().fg(accent)
    } else {
        Style::default().fg(theme::MUTED)
    };

    let text_style = if !style.is_enabled {
        Style::default().fg(theme::MUTED)
    } else if style.is_selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::TEXT)
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}
