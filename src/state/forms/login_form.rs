//! Login form state: registered fields, focus ring and toggles

use super::field::FormFieldState;
use std::collections::BTreeMap;

/// Trait for common form focus operations
pub trait Form {
    fn focus_count(&self) -> usize;
    fn active_index(&self) -> usize;
    fn set_active_index(&mut self, index: usize);
    fn next_focus(&mut self) {
        let count = self.focus_count();
        let current = self.active_index();
        self.set_active_index((current + 1) % count);
    }
    fn prev_focus(&mut self) {
        let count = self.focus_count();
        let current = self.active_index();
        if current == 0 {
            self.set_active_index(count - 1);
        } else {
            self.set_active_index(current - 1);
        }
    }
}

/// What currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// A registered field, by registration index
    Field(usize),
    Remember,
    Submit,
}

/// Key under which `form_data` reports the remember-me checkbox
pub const REMEMBER_KEY: &str = "remember";

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    /// Registered fields in registration order
    pub fields: Vec<FormFieldState>,
    pub active_index: usize,
    pub remember: bool,
    pub password_visible: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; re-registering a name replaces the earlier field
    pub fn register(&mut self, field: FormFieldState) {
        if let Some(existing) = self.field_mut(&field.name) {
            *existing = field;
        } else {
            self.fields.push(field);
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormFieldState> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormFieldState> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn focus(&self) -> Focus {
        let field_count = self.fields.len();
        match self.active_index {
            i if i < field_count => Focus::Field(i),
            i if i == field_count => Focus::Remember,
            _ => Focus::Submit,
        }
    }

    /// The focused field, if focus is on a field
    pub fn active_field(&self) -> Option<&FormFieldState> {
        match self.focus() {
            Focus::Field(i) => self.fields.get(i),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn focus_field(&mut self, name: &str) {
        if let Some(index) = self.fields.iter().position(|f| f.name == name) {
            self.active_index = index;
        }
    }

    /// Names of fields currently showing an error
    #[cfg(test)]
    pub fn fields_with_errors(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.error_message.is_some())
            .map(|f| f.name.as_str())
            .collect()
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.clear_error();
        }
    }

    pub fn mark_submitted(&mut self) {
        for field in &mut self.fields {
            field.submitted = true;
        }
    }

    /// Clear every field and toggle, focus back on the first field
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active_index = 0;
        self.remember = false;
        self.password_visible = false;
    }

    /// Raw field values keyed by name, plus the remember-me flag
    pub fn form_data(&self) -> BTreeMap<String, String> {
        let mut data: BTreeMap<String, String> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.raw_value.clone()))
            .collect();
        if self.remember {
            data.insert(REMEMBER_KEY.to_string(), "on".to_string());
        }
        data
    }
}

impl Form for LoginForm {
    fn focus_count(&self) -> usize {
        self.fields.len() + 2 // fields, remember-me, submit
    }
    fn active_index(&self) -> usize {
        self.active_index
    }
    fn set_active_index(&mut self, index: usize) {
        self.active_index = index.min(self.focus_count() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_form() -> LoginForm {
        let mut form = LoginForm::new();
        form.register(FormFieldState::text("email", "Email"));
        form.register(FormFieldState::secret("password", "Password"));
        form
    }

    mod focus {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_first_field() {
            let form = create_test_form();
            assert_eq!(form.focus(), Focus::Field(0));
            assert_eq!(form.active_field().unwrap().name, "email");
        }

        #[test]
        fn test_focus_ring_order() {
            let mut form = create_test_form();
            form.next_focus();
            assert_eq!(form.focus(), Focus::Field(1));
            form.next_focus();
            assert_eq!(form.focus(), Focus::Remember);
            form.next_focus();
            assert_eq!(form.focus(), Focus::Submit);
            form.next_focus();
            assert_eq!(form.focus(), Focus::Field(0)); // Wrapped back
        }

        #[test]
        fn test_prev_focus_wraps() {
            let mut form = create_test_form();
            form.prev_focus();
            assert_eq!(form.focus(), Focus::Submit);
        }

        #[test]
        fn test_set_active_index_clamps() {
            let mut form = create_test_form();
            form.set_active_index(100);
            assert_eq!(form.active_index, 3);
        }

        #[test]
        fn test_focus_field_by_name() {
            let mut form = create_test_form();
            form.focus_field("password");
            assert_eq!(form.focus(), Focus::Field(1));
            form.focus_field("missing");
            assert_eq!(form.focus(), Focus::Field(1));
        }

        #[test]
        fn test_no_active_field_on_buttons() {
            let mut form = create_test_form();
            form.set_active_index(3);
            assert!(form.active_field().is_none());
        }
    }

    mod registration {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_register_keeps_order() {
            let form = create_test_form();
            let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["email", "password"]);
        }

        #[test]
        fn test_register_same_name_replaces() {
            let mut form = create_test_form();
            form.register(FormFieldState::text("email", "Work email"));
            assert_eq!(form.fields.len(), 2);
            assert_eq!(form.field("email").unwrap().label, "Work email");
        }
    }

    #[test]
    fn test_form_data_includes_remember() {
        let mut form = create_test_form();
        form.field_mut("email").unwrap().raw_value = "a@b.com".to_string();
        form.field_mut("password").unwrap().raw_value = "validPass1".to_string();
        form.remember = true;

        let data = form.form_data();
        let expected: BTreeMap<String, String> = [
            ("email", "a@b.com"),
            ("password", "validPass1"),
            ("remember", "on"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        assert_eq!(data, expected);
    }

    #[test]
    fn test_form_data_omits_unchecked_remember() {
        let form = create_test_form();
        assert!(!form.form_data().contains_key(REMEMBER_KEY));
    }

    #[test]
    fn test_reset_clears_fields_and_toggles() {
        let mut form = create_test_form();
        form.field_mut("email").unwrap().push_char('a');
        form.field_mut("email").unwrap().set_verdict(false, "bad");
        form.mark_submitted();
        form.remember = true;
        form.password_visible = true;
        form.active_index = 2;

        form.reset();

        assert!(form.fields.iter().all(|f| f.raw_value.is_empty()));
        assert!(form.fields.iter().all(|f| !f.submitted));
        assert!(form.fields_with_errors().is_empty());
        assert!(!form.remember);
        assert!(!form.password_visible);
        assert_eq!(form.focus(), Focus::Field(0));
    }
}
