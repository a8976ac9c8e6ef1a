//! Field rendering utilities for forms

use crate::state::FormFieldState;
use crate::ui::theme;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Input box plus the error line below it
pub const FIELD_HEIGHT: u16 = 4;

/// Per-frame presentation of one input
pub struct FieldView<'a> {
    pub field: &'a FormFieldState,
    pub is_active: bool,
    /// Show a masked value in clear text
    pub reveal: bool,
    /// Effect colour overriding the border
    pub highlight: Option<Color>,
    /// Right-aligned hint inside the box
    pub hint: Option<&'a str>,
    /// Placeholder shown while the field is empty
    pub placeholder: &'a str,
}

/// Draw an input box with a floating label and its error line
pub fn draw_field(frame: &mut Frame, area: Rect, view: &FieldView) {
    let field = view.field;
    let box_area = Rect {
        height: area.height.min(3),
        ..area
    };

    let has_error = field.error_message.is_some();
    let border_color = match (view.highlight, has_error, view.is_active) {
        (Some(color), _, _) => color,
        (None, true, _) => theme::DANGER,
        (None, false, true) => theme::PRIMARY,
        (None, false, false) => theme::MUTED,
    };

    let display_value = field.display_value(view.reveal);
    let mut spans = if display_value.is_empty() && !view.is_active {
        vec![Span::styled(
            view.placeholder,
            Style::default().fg(theme::MUTED).add_modifier(Modifier::ITALIC),
        )]
    } else {
        vec![Span::styled(display_value, Style::default().fg(theme::TEXT))]
    };
    if view.is_active {
        spans.push(Span::styled("▌", Style::default().fg(theme::PRIMARY)));
    }

    // Label floats in the border once the field is focused or filled
    let label_style = if view.is_active || field.has_value() {
        Style::default().fg(border_color).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::MUTED)
    };
    let mut block = Block::default()
        .title(Span::styled(format!(" {} ", field.label), label_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    if let Some(hint) = view.hint {
        block = block.title_top(
            Line::from(Span::styled(format!(" {hint} "), Style::default().fg(theme::MUTED)))
                .right_aligned(),
        );
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), box_area);

    if area.height > box_area.height {
        let error_area = Rect {
            y: box_area.y + box_area.height,
            height: 1,
            ..area
        };
        if let Some(message) = &field.error_message {
            let error = Paragraph::new(Span::styled(
                format!(" {message}"),
                Style::default().fg(theme::DANGER),
            ));
            frame.render_widget(error, error_area);
        }
    }
}
