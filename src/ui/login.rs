//! Login card rendering

use super::components::{render_button, ButtonStyle, BUTTON_HEIGHT};
use super::forms::{draw_field, FieldView, FIELD_HEIGHT};
use super::layout::card_rect;
use super::theme;
use crate::app::App;
use crate::controller::{LoginFormController, EMAIL_FIELD};
use crate::platform::TOGGLE_PASSWORD_SHORTCUT;
use crate::state::{
    EffectKind, EffectQueue, EffectTarget, EntrancePhase, Focus, Provider, SubmissionState, Tone,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

const CARD_WIDTH: u16 = 52;
const CARD_HEIGHT: u16 = 24;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_FRAME_MS: u128 = 80;

/// Draw the login card into `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let now = Instant::now();
    let controller = &app.controller;
    let effects = controller.effects();

    let (y_offset, visible_fields) = match &app.entrance {
        Some(entrance) if entrance.phase == EntrancePhase::Hidden => return,
        Some(entrance) => (entrance.row_offset(), entrance.visible_fields),
        None => (0, controller.form().fields.len()),
    };
    let x_offset = effects
        .find(EffectKind::Shake, &EffectTarget::Card, now)
        .map(|e| e.shake_offset(now))
        .unwrap_or(0);

    let card = card_rect(area, CARD_WIDTH, CARD_HEIGHT, x_offset, y_offset);
    frame.render_widget(Clear, card);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(card_border_color(effects, now)))
        .style(Style::default().bg(theme::SURFACE));
    let inner = block.inner(card);
    frame.render_widget(block, card);

    if controller.state() == SubmissionState::Succeeded {
        draw_success(frame, inner, controller);
    } else {
        draw_form(frame, inner, controller, visible_fields, now);
    }
}

fn card_border_color(effects: &EffectQueue, now: Instant) -> Color {
    [Tone::Danger, Tone::Accent]
        .into_iter()
        .find(|tone| {
            effects
                .find(EffectKind::Glow(*tone), &EffectTarget::Card, now)
                .is_some()
        })
        .map(theme::tone_color)
        .unwrap_or(theme::SECONDARY)
}

fn pulsing(effects: &EffectQueue, target: &EffectTarget, now: Instant) -> bool {
    effects.find(EffectKind::Pulse, target, now).is_some()
}

fn draw_form(
    frame: &mut Frame,
    area: Rect,
    controller: &LoginFormController,
    visible_fields: usize,
    now: Instant,
) {
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
        Constraint::Length(1),             // Remember me / forgot password
        Constraint::Length(1),             // Padding
        Constraint::Length(BUTTON_HEIGHT), // Sign in
        Constraint::Length(1),             // Divider
        Constraint::Length(BUTTON_HEIGHT), // Social
        Constraint::Length(1),             // Sign up
        Constraint::Min(0),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(1)
        .constraints(constraints)
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled(
            "◆ NEON ACCESS ◆",
            Style::default()
                .fg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Sign in to continue",
            Style::default().fg(theme::TEXT),
        ))
        .alignment(Alignment::Center),
        chunks[2],
    );

    let effects = controller.effects();
    let toggle_pulse = pulsing(effects, &EffectTarget::PasswordToggle, now);
    let toggle_hint = format!(
        "{TOGGLE_PASSWORD_SHORTCUT} {}",
        if form.password_visible { "hide" } else { "show" }
    );

    for (idx, field) in form.fields.iter().enumerate().take(visible_fields) {
        let target = EffectTarget::Field(field.name.clone());
        let shake = effects
            .find(EffectKind::Shake, &target, now)
            .map(|e| e.shake_offset(now))
            .unwrap_or(0);
        let highlight = if field.masked && toggle_pulse {
            Some(theme::SECONDARY)
        } else {
            effects
                .find(EffectKind::Glow(Tone::Accent), &target, now)
                .map(|_| theme::PRIMARY)
        };
        let placeholder = if field.name == EMAIL_FIELD {
            "you@example.com"
        } else if field.masked {
            "Enter your password"
        } else {
            ""
        };

        let view = FieldView {
            field,
            is_active: form.focus() == Focus::Field(idx),
            reveal: form.password_visible,
            highlight,
            hint: field.masked.then_some(toggle_hint.as_str()),
            placeholder,
        };
        draw_field(frame, shift_x(chunks[4 + idx], shake), &view);
    }

    let base = 4 + field_count;
    draw_options_row(frame, chunks[base], controller, now);

    let state = controller.state();
    let submit_label = if state == SubmissionState::Submitting {
        let elapsed = effects
            .find(EffectKind::Glow(Tone::Accent), &EffectTarget::SubmitButton, now)
            .map(|e| now.saturating_duration_since(e.started_at).as_millis())
            .unwrap_or(0);
        let spinner = SPINNER[(elapsed / SPINNER_FRAME_MS) as usize % SPINNER.len()];
        format!("{spinner} Signing in...")
    } else {
        "Sign In".to_string()
    };
    render_button(
        frame,
        chunks[base + 2],
        &submit_label,
        ButtonStyle {
            is_selected: form.focus() == Focus::Submit,
            is_enabled: state.is_input_enabled(),
            highlight: (state == SubmissionState::Submitting).then_some(theme::PRIMARY),
        },
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            "──────── or continue with ────────",
            Style::default().fg(theme::MUTED),
        ))
        .alignment(Alignment::Center),
        chunks[base + 3],
    );

    let social = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[base + 4]);
    for (provider, key, slot) in [
        (Provider::Google, "F5", social[0]),
        (Provider::Apple, "F6", social[1]),
    ] {
        let highlight =
            pulsing(effects, &EffectTarget::Social(provider), now).then_some(theme::SECONDARY);
        render_button(
            frame,
            slot,
            &format!("{key} {}", provider.label()),
            ButtonStyle {
                is_selected: false,
                is_enabled: true,
                highlight,
            },
        );
    }

    let signup_style = link_style(pulsing(effects, &EffectTarget::SignupLink, now));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Don't have an account? ", Style::default().fg(theme::TEXT)),
            Span::styled("Sign up (F3)", signup_style),
        ]))
        .alignment(Alignment::Center),
        chunks[base + 5],
    );
}

fn link_style(pulse: bool) -> Style {
    if pulse {
        Style::default()
            .fg(theme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme::SECONDARY)
            .add_modifier(Modifier::UNDERLINED)
    }
}

fn draw_options_row(frame: &mut Frame, area: Rect, controller: &LoginFormController, now: Instant) {
    let form = controller.form();
    let effects = controller.effects();

    let focused = form.focus() == Focus::Remember;
    let checkbox = if form.remember { "[x]" } else { "[ ]" };
    let checkbox_style = if pulsing(effects, &EffectTarget::Checkbox, now) || focused {
        Style::default()
            .fg(theme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::TEXT)
    };

    frame.render_widget(
        Paragraph::new(Span::styled(format!("{checkbox} Remember me"), checkbox_style)),
        area,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "Forgot password? (F2)",
            link_style(pulsing(effects, &EffectTarget::ForgotLink, now)),
        ))
        .alignment(Alignment::Right),
        area,
    );
}

fn draw_success(frame: &mut Frame, area: Rect, controller: &LoginFormController) {
    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "✓ ACCESS GRANTED",
            Style::default()
                .fg(theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(session) = controller.session() {
        lines.push(Line::from(Span::styled(
            format!("Welcome back, {}", session.email),
            Style::default().fg(Color::White),
        )));
        lines.push(Line::from(Span::styled(
            format!(
                "Signed in at {}",
                session.authenticated_at.format("%H:%M:%S UTC")
            ),
            Style::default().fg(theme::TEXT),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Redirecting to your dashboard...",
        Style::default().fg(theme::MUTED),
    )));
    lines.push(Line::from(Span::styled(
        "Esc: sign out",
        Style::default().fg(theme::SECONDARY),
    )));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Move a rect sideways without leaving its row
fn shift_x(area: Rect, offset: i16) -> Rect {
    Rect {
        x: (area.x as i32 + offset as i32).max(0) as u16,
        ..area
    }
}
