//! Sign-up card rendering

use super::components::{render_button, ButtonStyle, BUTTON_HEIGHT};
use super::forms::{draw_field, FieldView, FIELD_HEIGHT};
use super::layout::card_rect;
use super::theme;
use crate::platform::TOGGLE_PASSWORD_SHORTCUT;
use crate::registration::RegistrationController;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 23;

pub fn draw(frame: &mut Frame, area: Rect, controller: &RegistrationController) {
    let card = card_rect(area, CARD_WIDTH, CARD_HEIGHT, 0, 0);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::SECONDARY))
        .style(Style::default().bg(theme::SURFACE));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let form = controller.form();
    let field_count = form.fields.len();

    let mut constraints = vec![
        Constraint::Length(1), // Padding
        Constraint::Length(1), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(1), // Padding
    ];
    constraints.extend(std::iter::repeat(Constraint::Length(FIELD_HEIGHT)).take(field_count));
    constraints.extend([
        Constraint::Length(BUTTON_HEIGHT), // Create account
        Constraint::Length(1),             // Back link
        Constraint::Min(0),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "◆ NEW OPERATIVE ◆",
            Style::default()
                .fg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Create your account",
            Style::default().fg(theme::TEXT),
        ))
        .alignment(Alignment::Center),
        chunks[2],
    );

    let toggle_hint = format!(
        "{TOGGLE_PASSWORD_SHORTCUT} {}",
        if form.password_visible { "hide" } else { "show" }
    );
    for (idx, field) in form.fields.iter().enumerate() {
        let view = FieldView {
            field,
            is_active: form.active_index == idx,
            reveal: form.password_visible,
            highlight: None,
            hint: (field.masked && idx == 1).then_some(toggle_hint.as_str()),
            placeholder: if field.masked { "" } else { "you@example.com" },
        };
        draw_field(frame, chunks[4 + idx], &view);
    }

    let base = 4 + field_count;
    render_button(
        frame,
        chunks[base],
        "Create Account",
        ButtonStyle {
            is_selected: form.is_submit_focused(),
            is_enabled: true,
            highlight: None,
        },
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Already registered? ", Style::default().fg(theme::TEXT)),
            Span::styled(
                "Back to sign in (Esc)",
                Style::default()
                    .fg(theme::SECONDARY)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]))
        .alignment(Alignment::Center),
        chunks[base + 1],
    );
}
