//! Login form controller
//!
//! Owns the submission state machine. Every change of `SubmissionState` goes
//! through [`LoginFormController::transition`], which checks the transition
//! table and broadcasts the change as an [`AppEvent::StateChanged`].

use crate::auth::{
    ActivityKind, AttemptStatus, AuthClient, AuthError, AuthSession, Credentials, LogEntry,
};
use crate::events::AppEvent;
use crate::state::{
    Effect, EffectKind, EffectQueue, EffectTarget, EmailValidator, FieldValidator, Form,
    FormFieldState, FormHandle, LoginForm, NotificationSink, PasswordValidator, Provider,
    Severity, SubmissionState, Tone, ValidationResult, PULSE_DURATION, SHAKE_DURATION,
    SOCIAL_PULSE_DURATION, SUCCESS_GLOW_DURATION, TOGGLE_PULSE_DURATION,
};
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

pub const EMAIL_FIELD: &str = "email";
pub const PASSWORD_FIELD: &str = "password";

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no field named `{0}` is registered on this form")]
    UnknownField(String),
    #[error("cannot submit while the form is {0}")]
    Busy(SubmissionState),
    #[error("one or more fields are invalid")]
    Invalid,
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Timing knobs of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Upper bound on a single authentication call
    pub auth_timeout: Duration,
    /// How long the confirmation stays before the form resets
    pub success_reset_delay: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            auth_timeout: Duration::from_secs(10),
            success_reset_delay: Duration::from_millis(5300),
        }
    }
}

/// Credentials handed out when a submission reaches `Submitting`
#[derive(Debug)]
pub struct PendingAttempt {
    pub id: u64,
    pub credentials: Credentials,
}

pub struct LoginFormController {
    form: LoginForm,
    validators: HashMap<String, Box<dyn FieldValidator>>,
    state: SubmissionState,
    auth: Arc<dyn AuthClient>,
    notifier: Arc<dyn NotificationSink>,
    events: UnboundedSender<AppEvent>,
    handle: FormHandle,
    settings: ControllerSettings,
    effects: EffectQueue,
    /// Generation of the newest attempt; results for older ones are stale
    attempt: u64,
    reset_at: Option<Instant>,
    last_error: Option<String>,
    session: Option<AuthSession>,
    /// Email of the attempt in flight, until its outcome is recorded
    pending_email: Option<String>,
}

impl LoginFormController {
    /// Create a controller with no registered fields
    pub fn new(
        auth: Arc<dyn AuthClient>,
        notifier: Arc<dyn NotificationSink>,
        events: UnboundedSender<AppEvent>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            form: LoginForm::new(),
            validators: HashMap::new(),
            state: SubmissionState::Idle,
            auth,
            notifier,
            events,
            handle: FormHandle::new("login"),
            settings,
            effects: EffectQueue::new(),
            attempt: 0,
            reset_at: None,
            last_error: None,
            session: None,
            pending_email: None,
        }
    }

    /// Create a controller with the email and password fields registered
    pub fn with_login_fields(
        auth: Arc<dyn AuthClient>,
        notifier: Arc<dyn NotificationSink>,
        events: UnboundedSender<AppEvent>,
        settings: ControllerSettings,
        min_password_length: usize,
    ) -> Result<Self, regex::Error> {
        let mut controller = Self::new(auth, notifier, events, settings);
        controller.register_field(FormFieldState::text(EMAIL_FIELD, "Email"), EmailValidator::new()?);
        controller.register_field(
            FormFieldState::secret(PASSWORD_FIELD, "Password"),
            PasswordValidator::new(min_password_length),
        );
        Ok(controller)
    }

    /// Register a field together with its validator
    pub fn register_field(&mut self, field: FormFieldState, validator: impl FieldValidator + 'static) {
        self.validators
            .insert(field.name.clone(), Box::new(validator));
        self.form.register(field);
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn form(&self) -> &LoginForm {
        &self.form
    }

    pub fn effects(&self) -> &EffectQueue {
        &self.effects
    }

    /// Failure message of the last attempt, while the form is `Failed`
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Session of the last successful attempt, until reset
    pub fn session(&self) -> Option<&AuthSession> {
        self.session.as_ref()
    }

    /// Raw field values keyed by name, plus the remember-me flag
    #[allow(dead_code)]
    pub fn form_data(&self) -> BTreeMap<String, String> {
        self.form.form_data()
    }

    // === State machine ===

    /// Move to `next` if the transition table allows it, running its entry action
    fn transition(&mut self, next: SubmissionState) -> bool {
        let from = self.state;
        if !from.can_transition_to(next) {
            tracing::warn!(%from, to = %next, "Refused form state transition");
            return false;
        }
        self.state = next;
        tracing::debug!(%from, to = %next, "Form state changed");
        let _ = self.events.send(AppEvent::StateChanged { from, to: next });
        self.enter(next);
        true
    }

    fn enter(&mut self, state: SubmissionState) {
        let now = Instant::now();
        match state {
            SubmissionState::Idle => {
                self.last_error = None;
            }
            SubmissionState::Validating => {}
            SubmissionState::Submitting => {
                self.form.mark_submitted();
                self.effects.push(Effect::held(
                    EffectKind::Glow(Tone::Accent),
                    EffectTarget::SubmitButton,
                    now,
                ));
            }
            SubmissionState::Succeeded => {
                self.effects.remove_target(&EffectTarget::SubmitButton);
                self.effects.push(Effect::new(
                    EffectKind::Glow(Tone::Accent),
                    EffectTarget::Card,
                    now,
                    SUCCESS_GLOW_DURATION,
                ));
                self.reset_at = Some(now + self.settings.success_reset_delay);
            }
            SubmissionState::Failed => {
                self.effects.remove_target(&EffectTarget::SubmitButton);
                self.shake_card(now);
            }
        }
    }

    fn shake_card(&mut self, now: Instant) {
        self.effects.push(Effect::new(
            EffectKind::Shake,
            EffectTarget::Card,
            now,
            SHAKE_DURATION,
        ));
        self.effects.push(Effect::new(
            EffectKind::Glow(Tone::Danger),
            EffectTarget::Card,
            now,
            SHAKE_DURATION,
        ));
    }

    /// Leave `Failed` for `Idle` so a new attempt can start
    fn leave_failed(&mut self) {
        if self.state == SubmissionState::Failed {
            self.transition(SubmissionState::Idle);
        }
    }

    fn begin_attempt(&mut self, email: &str) -> u64 {
        self.attempt += 1;
        self.pending_email = Some(email.to_string());
        self.transition(SubmissionState::Submitting);
        tracing::info!(attempt = self.attempt, "Submitting credentials");
        self.attempt
    }

    /// Emit the outcome of the attempt in flight for the activity log
    fn record_attempt(&mut self, status: AttemptStatus) {
        if let Some(email) = self.pending_email.take() {
            self.record(ActivityKind::Login, email, status);
        }
    }

    fn record(&self, kind: ActivityKind, email: String, status: AttemptStatus) {
        let _ = self
            .events
            .send(AppEvent::Activity(LogEntry::now(kind, email, status)));
    }

    fn fail(&mut self, error: AuthError) {
        let message = error.user_message();
        let severity = match error {
            AuthError::Cancelled => Severity::Info,
            _ => Severity::Error,
        };
        tracing::info!(attempt = self.attempt, "Sign-in failed: {message}");
        self.record_attempt(AttemptStatus::Failed);
        self.last_error = Some(message.clone());
        self.transition(SubmissionState::Failed);
        self.notifier.notify(&message, severity, &self.handle);
    }

    // === Validation ===

    /// Validate one field, recording its verdict
    pub fn validate_field(&mut self, name: &str) -> Result<ValidationResult, FormError> {
        let (validator, field) = match (self.validators.get(name), self.form.field_mut(name)) {
            (Some(validator), Some(field)) => (validator, field),
            _ => {
                tracing::warn!(field = name, "Validation requested for unregistered field");
                return Err(FormError::UnknownField(name.to_string()));
            }
        };

        let result = validator.validate(field.trimmed());
        field.set_verdict(result.valid, &result.message);

        let now = Instant::now();
        let target = EffectTarget::Field(name.to_string());
        if result.valid {
            self.effects.push(Effect::new(
                EffectKind::Glow(Tone::Accent),
                target,
                now,
                SUCCESS_GLOW_DURATION,
            ));
        } else {
            self.effects
                .push(Effect::new(EffectKind::Shake, target, now, SHAKE_DURATION));
        }
        Ok(result)
    }

    /// Validate every registered field; all of them are checked so every error shows at once
    pub fn validate_all(&mut self) -> bool {
        let names: Vec<String> = self.form.fields.iter().map(|f| f.name.clone()).collect();
        let mut all_valid = true;
        for name in names {
            match self.validate_field(&name) {
                Ok(result) if result.valid => {}
                _ => all_valid = false,
            }
        }
        all_valid
    }

    // === Submission ===

    /// Start a submission from the form's fields.
    ///
    /// Returns the attempt to authenticate once the form reaches `Submitting`;
    /// `None` when the form is busy or a field is invalid.
    pub fn submit(&mut self) -> Option<PendingAttempt> {
        if !self.state.accepts_submit() {
            tracing::debug!(state = %self.state, "Submit ignored while busy");
            return None;
        }
        self.leave_failed();
        self.transition(SubmissionState::Validating);

        if !self.validate_all() {
            self.shake_card(Instant::now());
            self.transition(SubmissionState::Idle);
            return None;
        }

        let credentials = self.snapshot();
        let id = self.begin_attempt(&credentials.email);
        Some(PendingAttempt { id, credentials })
    }

    fn snapshot(&self) -> Credentials {
        let value = |name: &str| {
            self.form
                .field(name)
                .map(|f| f.raw_value.clone())
                .unwrap_or_default()
        };
        Credentials::new(value(EMAIL_FIELD).trim(), value(PASSWORD_FIELD))
    }

    /// Future performing the authentication call under the configured timeout.
    ///
    /// Owns everything it needs so it can be spawned; the result goes back
    /// through [`finish_submission`](Self::finish_submission).
    pub fn authenticate(
        &self,
        credentials: Credentials,
    ) -> impl Future<Output = Result<AuthSession, AuthError>> + Send + 'static {
        let auth = Arc::clone(&self.auth);
        let limit = self.settings.auth_timeout;
        async move {
            match tokio::time::timeout(limit, auth.authenticate(&credentials)).await {
                Ok(result) => result,
                Err(_) => Err(AuthError::TimedOut(limit)),
            }
        }
    }

    /// Apply the outcome of an attempt. Returns false for a stale result.
    pub fn finish_submission(
        &mut self,
        attempt: u64,
        result: Result<AuthSession, AuthError>,
    ) -> bool {
        if attempt != self.attempt || self.state != SubmissionState::Submitting {
            tracing::debug!(attempt, current = self.attempt, "Ignoring stale sign-in result");
            return false;
        }
        match result {
            Ok(session) => {
                tracing::info!(attempt, email = %session.email, "Signed in");
                self.record_attempt(AttemptStatus::Success);
                let welcome = format!("Welcome back, {}", session.email);
                self.session = Some(session);
                self.transition(SubmissionState::Succeeded);
                self.notifier.notify(&welcome, Severity::Success, &self.handle);
            }
            Err(error) => self.fail(error),
        }
        true
    }

    /// Authenticate a credentials snapshot and wait for the outcome.
    ///
    /// Continues an attempt already started by [`submit`](Self::submit);
    /// otherwise walks `Validating` itself, where the snapshot only has to be
    /// complete.
    #[allow(dead_code)]
    pub async fn submit_credentials(
        &mut self,
        credentials: Credentials,
    ) -> Result<AuthSession, FormError> {
        let attempt = match self.state {
            SubmissionState::Submitting => self.attempt,
            state if state.accepts_submit() => {
                self.leave_failed();
                self.transition(SubmissionState::Validating);
                if !credentials.is_complete() {
                    self.shake_card(Instant::now());
                    self.transition(SubmissionState::Idle);
                    return Err(FormError::Invalid);
                }
                self.begin_attempt(&credentials.email)
            }
            state => return Err(FormError::Busy(state)),
        };

        let result = self.authenticate(credentials).await;
        self.finish_submission(attempt, result.clone());
        result.map_err(FormError::from)
    }

    /// Abort the outstanding attempt. Returns false when nothing was pending.
    pub fn cancel_submission(&mut self) -> bool {
        if self.state != SubmissionState::Submitting {
            return false;
        }
        self.attempt += 1;
        self.fail(AuthError::Cancelled);
        true
    }

    /// Advance time: prune finished effects and run a due automatic reset.
    /// Returns true when the form was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.effects.prune(now);
        match self.reset_at {
            Some(deadline) if self.state == SubmissionState::Succeeded && now >= deadline => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Sign out of the session shown on the confirmation panel.
    /// Returns false when nobody is signed in.
    pub fn sign_out(&mut self) -> bool {
        let email = match (&self.state, &self.session) {
            (SubmissionState::Succeeded, Some(session)) => session.email.clone(),
            _ => return false,
        };
        tracing::info!(%email, "Signed out");
        self.record(ActivityKind::Logout, email, AttemptStatus::Success);
        self.notifier.notify("Signed out", Severity::Info, &self.handle);
        self.reset();
        true
    }

    /// Clear every field and return to `Idle` from any state.
    /// An attempt still in flight is recorded as failed.
    pub fn reset(&mut self) {
        self.record_attempt(AttemptStatus::Failed);
        self.attempt += 1;
        self.form.reset();
        self.effects.clear();
        self.reset_at = None;
        self.last_error = None;
        self.session = None;

        if self.state.can_transition_to(SubmissionState::Idle) {
            self.transition(SubmissionState::Idle);
        } else if self.state != SubmissionState::Idle {
            let from = self.state;
            tracing::debug!(%from, "Forcing form back to Idle");
            self.state = SubmissionState::Idle;
            let _ = self.events.send(AppEvent::StateChanged {
                from,
                to: SubmissionState::Idle,
            });
        }
    }

    // === Input ===

    /// Type into a field; typing clears the field's error
    pub fn input_char(&mut self, name: &str, c: char) {
        if !self.state.is_input_enabled() {
            return;
        }
        if let Some(field) = self.form.field_mut(name) {
            field.push_char(c);
            field.clear_error();
        }
    }

    /// Delete the last character of a field
    pub fn delete_char(&mut self, name: &str) {
        if !self.state.is_input_enabled() {
            return;
        }
        if let Some(field) = self.form.field_mut(name) {
            field.pop_char();
            field.clear_error();
        }
    }

    /// Focus is leaving a field
    pub fn blur(&mut self, name: &str) -> Result<ValidationResult, FormError> {
        self.validate_field(name)
    }

    /// Move focus forward, validating the field being left
    pub fn focus_next(&mut self) {
        self.blur_active();
        self.form.next_focus();
    }

    /// Move focus backward, validating the field being left
    pub fn focus_prev(&mut self) {
        self.blur_active();
        self.form.prev_focus();
    }

    fn blur_active(&mut self) {
        if !self.state.is_input_enabled() {
            return;
        }
        if let Some(name) = self.form.active_field().map(|f| f.name.clone()) {
            let _ = self.blur(&name);
        }
    }

    pub fn clear_errors(&mut self) {
        self.form.clear_errors();
    }

    pub fn toggle_password_visibility(&mut self) {
        self.form.password_visible = !self.form.password_visible;
        self.effects.push(Effect::new(
            EffectKind::Pulse,
            EffectTarget::PasswordToggle,
            Instant::now(),
            TOGGLE_PULSE_DURATION,
        ));
    }

    pub fn toggle_remember(&mut self) {
        if !self.state.is_input_enabled() {
            return;
        }
        self.form.remember = !self.form.remember;
        self.effects.push(Effect::new(
            EffectKind::Pulse,
            EffectTarget::Checkbox,
            Instant::now(),
            PULSE_DURATION,
        ));
    }

    pub fn forgot_password(&mut self) {
        self.pulse_and_notify(
            EffectTarget::ForgotLink,
            PULSE_DURATION,
            "Password reset link would be sent to your email",
        );
    }

    pub fn sign_up(&mut self) {
        self.pulse_and_notify(
            EffectTarget::SignupLink,
            PULSE_DURATION,
            "Redirecting to sign up page...",
        );
    }

    pub fn social_login(&mut self, provider: Provider) {
        let message = format!("Connecting to {}...", provider.label());
        self.pulse_and_notify(EffectTarget::Social(provider), SOCIAL_PULSE_DURATION, &message);
    }

    fn pulse_and_notify(&mut self, target: EffectTarget, duration: Duration, message: &str) {
        self.effects
            .push(Effect::new(EffectKind::Pulse, target, Instant::now(), duration));
        self.notifier.notify(message, Severity::Info, &self.handle);
    }
}
