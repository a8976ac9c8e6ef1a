//! Form field value objects

/// Shown when a validator rejects a value without saying why
const FALLBACK_ERROR: &str = "Invalid value";

/// Represents a single registered form field: its value and latest verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFieldState {
    pub name: String,
    pub label: String,
    pub raw_value: String,
    pub is_valid: bool,
    pub error_message: Option<String>,
    /// Part of a credentials snapshot taken since the last reset
    pub submitted: bool,
    /// Rendered as bullets unless revealed
    pub masked: bool,
}

impl FormFieldState {
    /// Create a new plain text field
    pub fn text(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            raw_value: String::new(),
            is_valid: true,
            error_message: None,
            submitted: false,
            masked: false,
        }
    }

    /// Create a new secret field
    pub fn secret(name: &str, label: &str) -> Self {
        Self {
            masked: true,
            ..Self::text(name, label)
        }
    }

    /// The value validators see
    pub fn trimmed(&self) -> &str {
        self.raw_value.trim()
    }

    pub fn has_value(&self) -> bool {
        !self.trimmed().is_empty()
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        self.raw_value.push(c);
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        self.raw_value.pop();
    }

    /// Record a validation verdict; an invalid verdict always carries a message
    pub fn set_verdict(&mut self, valid: bool, message: &str) {
        self.is_valid = valid;
        self.error_message = match (valid, message.is_empty()) {
            (true, _) => None,
            (false, true) => Some(FALLBACK_ERROR.to_string()),
            (false, false) => Some(message.to_string()),
        };
    }

    pub fn clear_error(&mut self) {
        self.is_valid = true;
        self.error_message = None;
    }

    /// Back to the freshly registered state
    pub fn clear(&mut self) {
        self.raw_value.clear();
        self.clear_error();
        self.submitted = false;
    }

    /// Get the display value for rendering
    pub fn display_value(&self, reveal: bool) -> String {
        if self.masked && !reveal {
            "•".repeat(self.raw_value.chars().count())
        } else {
            self.raw_value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_text_field_is_clean() {
        let field = FormFieldState::text("email", "Email");
        assert_eq!(field.name, "email");
        assert!(field.is_valid);
        assert!(field.error_message.is_none());
        assert!(!field.submitted);
        assert!(!field.masked);
    }

    #[test]
    fn test_secret_field_is_masked() {
        let mut field = FormFieldState::secret("password", "Password");
        for c in "abc".chars() {
            field.push_char(c);
        }
        assert_eq!(field.display_value(false), "•••");
        assert_eq!(field.display_value(true), "abc");
    }

    #[test]
    fn test_trimmed_ignores_whitespace() {
        let mut field = FormFieldState::text("email", "Email");
        field.raw_value = "  a@b.com ".to_string();
        assert_eq!(field.trimmed(), "a@b.com");
        assert!(field.has_value());
    }

    #[test]
    fn test_invalid_verdict_stores_message() {
        let mut field = FormFieldState::text("email", "Email");
        field.set_verdict(false, "Email is required");
        assert!(!field.is_valid);
        assert_eq!(field.error_message.as_deref(), Some("Email is required"));

        field.set_verdict(true, "");
        assert!(field.is_valid);
        assert!(field.error_message.is_none());
    }

    #[test]
    fn test_invalid_verdict_without_message_gets_fallback() {
        let mut field = FormFieldState::text("email", "Email");
        field.set_verdict(false, "");
        assert_eq!(field.error_message.as_deref(), Some(FALLBACK_ERROR));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut field = FormFieldState::text("email", "Email");
        field.push_char('x');
        field.set_verdict(false, "bad");
        field.submitted = true;

        field.clear();

        assert_eq!(field, FormFieldState::text("email", "Email"));
    }

    #[test]
    fn test_pop_char_on_empty_is_harmless() {
        let mut field = FormFieldState::text("email", "Email");
        field.pop_char();
        assert_eq!(field.raw_value, "");
    }
}
