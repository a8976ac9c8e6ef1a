//! Sign-up form state

use super::field::FormFieldState;
use super::login_form::Form;
use crate::auth::Registration;

pub const CONFIRM_FIELD: &str = "confirm";

#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// Email, password and confirmation, in that order
    pub fields: Vec<FormFieldState>,
    pub active_index: usize,
    pub password_visible: bool,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            fields: vec![
                FormFieldState::text("email", "Email"),
                FormFieldState::secret("password", "Password"),
                FormFieldState::secret(CONFIRM_FIELD, "Confirm password"),
            ],
            active_index: 0,
            password_visible: false,
        }
    }
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, name: &str) -> Option<&FormFieldState> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormFieldState> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// The focused field; `None` when the create button has focus
    pub fn active_field(&self) -> Option<&FormFieldState> {
        self.fields.get(self.active_index)
    }

    pub fn active_field_mut(&mut self) -> Option<&mut FormFieldState> {
        self.fields.get_mut(self.active_index)
    }

    pub fn is_submit_focused(&self) -> bool {
        self.active_index == self.fields.len()
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Snapshot for the account registry; the email is trimmed
    pub fn registration(&self) -> Registration {
        let value = |name: &str| {
            self.field(name)
                .map(|f| f.raw_value.clone())
                .unwrap_or_default()
        };
        Registration::new(
            value("email").trim(),
            value("password"),
            value(CONFIRM_FIELD),
        )
    }
}

impl Form for RegistrationForm {
    fn focus_count(&self) -> usize {
        self.fields.len() + 1 // fields, create button
    }
    fn active_index(&self) -> usize {
        self.active_index
    }
    fn set_active_index(&mut self, index: usize) {
        self.active_index = index.min(self.focus_count() - 1);
    }
}
