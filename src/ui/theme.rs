//! Neon colour palette

use crate::state::{Severity, Tone};
use ratatui::style::Color;

pub const PRIMARY: Color = Color::Rgb(0, 255, 136);
pub const SECONDARY: Color = Color::Rgb(0, 153, 255);
pub const DANGER: Color = Color::Rgb(255, 0, 128);
pub const MUTED: Color = Color::DarkGray;
pub const TEXT: Color = Color::Gray;
pub const SURFACE: Color = Color::Black;

pub fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Accent => PRIMARY,
        Tone::Danger => DANGER,
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => SECONDARY,
        Severity::Success => PRIMARY,
        Severity::Error => DANGER,
    }
}
