//! Sign-up form controller
//!
//! Validates the sign-up fields the same way the login form does, then hands
//! the snapshot to an [`AccountRegistry`]. Created accounts can sign in
//! straight away.

use crate::auth::{
    AccountRegistry, ActivityKind, AttemptStatus, LogEntry, RegistrationError,
};
use crate::events::AppEvent;
use crate::state::{
    EmailValidator, FieldValidator, Form, FormHandle, NotificationSink, PasswordValidator,
    RegistrationForm, Severity, ValidationResult, CONFIRM_FIELD,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

pub struct RegistrationController {
    form: RegistrationForm,
    email: EmailValidator,
    password: PasswordValidator,
    registry: Arc<dyn AccountRegistry>,
    notifier: Arc<dyn NotificationSink>,
    events: UnboundedSender<AppEvent>,
    handle: FormHandle,
}

impl RegistrationController {
    pub fn new(
        registry: Arc<dyn AccountRegistry>,
        notifier: Arc<dyn NotificationSink>,
        events: UnboundedSender<AppEvent>,
        min_password_length: usize,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            form: RegistrationForm::new(),
            email: EmailValidator::new()?,
            password: PasswordValidator::new(min_password_length),
            registry,
            notifier,
            events,
            handle: FormHandle::new("register"),
        })
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    fn verdict(&self, name: &str) -> ValidationResult {
        let value = |name: &str| {
            self.form
                .field(name)
                .map(|f| f.trimmed().to_string())
                .unwrap_or_default()
        };
        match name {
            "email" => self.email.validate(&value("email")),
            "password" => self.password.validate(&value("password")),
            CONFIRM_FIELD => {
                let confirm = value(CONFIRM_FIELD);
                if confirm.is_empty() {
                    ValidationResult::invalid("Please confirm your password")
                } else if confirm != value("password") {
                    ValidationResult::invalid(RegistrationError::PasswordMismatch.to_string())
                } else {
                    ValidationResult::ok()
                }
            }
            _ => ValidationResult::ok(),
        }
    }

    fn validate_field(&mut self, name: &str) -> bool {
        let result = self.verdict(name);
        if let Some(field) = self.form.field_mut(name) {
            field.set_verdict(result.valid, &result.message);
        }
        result.valid
    }

    fn validate_all(&mut self) -> bool {
        let names: Vec<String> = self.form.fields.iter().map(|f| f.name.clone()).collect();
        let mut all_valid = true;
        for name in names {
            all_valid &= self.validate_field(&name);
        }
        all_valid
    }

    pub fn input_char(&mut self, c: char) {
        if let Some(field) = self.form.active_field_mut() {
            field.push_char(c);
            field.clear_error();
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(field) = self.form.active_field_mut() {
            field.pop_char();
            field.clear_error();
        }
    }

    pub fn focus_next(&mut self) {
        self.blur_active();
        self.form.next_focus();
    }

    pub fn focus_prev(&mut self) {
        self.blur_active();
        self.form.prev_focus();
    }

    fn blur_active(&mut self) {
        if let Some(name) = self.form.active_field().map(|f| f.name.clone()) {
            self.validate_field(&name);
        }
    }

    pub fn toggle_password_visibility(&mut self) {
        self.form.password_visible = !self.form.password_visible;
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Create the account. Returns true when it was created; the form is
    /// cleared and a REGISTER entry is emitted for the activity log.
    pub fn submit(&mut self) -> bool {
        if !self.validate_all() {
            return false;
        }

        let registration = self.form.registration();
        match self.registry.register(&registration) {
            Ok(()) => {
                tracing::info!(email = %registration.email, "Account created");
                let _ = self.events.send(AppEvent::Activity(LogEntry::now(
                    ActivityKind::Register,
                    registration.email.clone(),
                    AttemptStatus::Success,
                )));
                self.notifier.notify(
                    "Account created. You can sign in now.",
                    Severity::Success,
                    &self.handle,
                );
                self.form.reset();
                true
            }
            Err(error) => {
                tracing::info!(email = %registration.email, "Registration refused: {error}");
                let field = match error {
                    RegistrationError::MissingFields => None,
                    RegistrationError::PasswordMismatch => Some(CONFIRM_FIELD),
                    RegistrationError::AlreadyExists => Some("email"),
                };
                let message = error.to_string();
                if let Some(field) = field.and_then(|name| self.form.field_mut(name)) {
                    field.set_verdict(false, &message);
                }
                self.notifier.notify(&message, Severity::Error, &self.handle);
                false
            }
        }
    }
}
