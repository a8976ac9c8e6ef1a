//! Reusable UI components

mod button;
mod toast;

pub use button::{render_button, ButtonStyle, BUTTON_HEIGHT};
pub use toast::render_toasts;
