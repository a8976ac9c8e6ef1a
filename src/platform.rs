//! Platform-specific key bindings and their display labels

use crossterm::event::KeyCode;

/// Reveal or hide the password
pub const TOGGLE_PASSWORD_KEY: KeyCode = KeyCode::F(4);
/// Request a password reset link
pub const FORGOT_PASSWORD_KEY: KeyCode = KeyCode::F(2);
/// Go to sign-up
pub const SIGN_UP_KEY: KeyCode = KeyCode::F(3);
/// Sign in with Google
pub const GOOGLE_KEY: KeyCode = KeyCode::F(5);
/// Sign in with Apple
pub const APPLE_KEY: KeyCode = KeyCode::F(6);

/// Quit shortcut display
pub const QUIT_SHORTCUT: &str = "Ctrl+C";

/// Password toggle display
/// - macOS: "fn+F4" (function keys need fn on Mac keyboards)
/// - Linux/Windows: "F4"
#[cfg(target_os = "macos")]
pub const TOGGLE_PASSWORD_SHORTCUT: &str = "fn+F4";

#[cfg(not(target_os = "macos"))]
pub const TOGGLE_PASSWORD_SHORTCUT: &str = "F4";

/// Status bar hint listing the sign-in form shortcuts
pub fn shortcut_hint() -> String {
    format!(
        "Tab:next  Enter:sign in  Esc:cancel/clear  F2:forgot  F3:sign up  {TOGGLE_PASSWORD_SHORTCUT}:show password  F5/F6:social  {QUIT_SHORTCUT}:quit"
    )
}

/// Status bar hint listing the sign-up form shortcuts
pub fn sign_up_hint() -> String {
    format!(
        "Tab:next  Enter:create account  Esc:back  {TOGGLE_PASSWORD_SHORTCUT}:show password  {QUIT_SHORTCUT}:quit"
    )
}
