//! Application state and core logic

use crate::auth::{AccountRegistry, AttemptLog, AuthClient, LogEntry, SimulatedAuthClient};
use crate::config::LoginConfig;
use crate::controller::{LoginFormController, PendingAttempt};
use crate::events::AppEvent;
use crate::platform::{
    APPLE_KEY, FORGOT_PASSWORD_KEY, GOOGLE_KEY, SIGN_UP_KEY, TOGGLE_PASSWORD_KEY,
};
use crate::registration::RegistrationController;
use crate::state::{EntranceState, Focus, NotificationCenter, Provider, SubmissionState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Which form is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
}

/// Main application struct
pub struct App {
    /// The login form and its submission state machine
    pub controller: LoginFormController,
    /// The sign-up form
    pub registration: RegistrationController,
    pub screen: Screen,
    /// Toasts shown over the form
    pub notifications: NotificationCenter,
    /// Card entrance animation, `None` once settled
    pub entrance: Option<EntranceState>,
    /// One-line status shown in the status bar
    pub status_message: Option<String>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
    /// Activity log writer, `None` when logging is off
    activity_tx: Option<UnboundedSender<LogEntry>>,
    /// Outstanding authentication call
    auth_task: Option<JoinHandle<()>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app backed by the simulated authentication service.
    ///
    /// Must be called from within a Tokio runtime when the activity log is on.
    pub fn new(config: &LoginConfig) -> Result<Self> {
        let backend = Arc::new(SimulatedAuthClient::new(
            config.demo_users(),
            config.simulated_latency(),
        ));
        Self::with_backend(backend.clone(), backend, config)
    }

    /// Create the app with specific sign-in and sign-up backends
    pub fn with_backend(
        auth: Arc<dyn AuthClient>,
        registry: Arc<dyn AccountRegistry>,
        config: &LoginConfig,
    ) -> Result<Self> {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let notifications = NotificationCenter::new(config.notification_ttl());
        let controller = LoginFormController::with_login_fields(
            auth,
            Arc::new(notifications.clone()),
            events_tx.clone(),
            config.controller_settings(),
            config.min_password_length(),
        )?;
        let registration = RegistrationController::new(
            registry,
            Arc::new(notifications.clone()),
            events_tx.clone(),
            config.min_password_length(),
        )?;
        let activity_tx = config.attempt_log_path().map(|path| {
            tracing::info!("Recording account activity to {}", path.display());
            AttemptLog::new(path).spawn_writer()
        });

        Ok(Self {
            controller,
            registration,
            screen: Screen::Login,
            notifications,
            entrance: Some(EntranceState::new(Instant::now())),
            status_message: None,
            events_tx,
            events_rx,
            activity_tx,
            auth_task: None,
            quit: false,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Check if the entrance animation is still running
    pub fn in_entrance(&self) -> bool {
        self.entrance.is_some()
    }

    fn field_count(&self) -> usize {
        self.controller.form().fields.len()
    }

    /// Jump to the end of the entrance animation
    pub fn skip_entrance(&mut self) {
        let field_count = self.field_count();
        if let Some(ref mut entrance) = self.entrance {
            entrance.skip(field_count);
        }
        self.entrance = None;
    }

    /// Advance animations and timers
    pub fn tick(&mut self, now: Instant) {
        let field_count = self.field_count();
        if let Some(ref mut entrance) = self.entrance {
            entrance.update(now, field_count);
            if entrance.is_settled() {
                self.entrance = None;
            }
        }
        if self.controller.tick(now) {
            tracing::debug!("Form reset after successful sign-in");
        }
        self.notifications.prune(now);
    }

    /// Whether the next frames change without input (drives the poll rate)
    pub fn is_animating(&self, now: Instant) -> bool {
        self.in_entrance()
            || self.controller.effects().is_animating(now)
            || self.controller.state() == SubmissionState::Submitting
            || !self.notifications.is_empty()
    }

    /// Apply every event queued since the last call
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
        }
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::StateChanged { to, .. } => {
                self.status_message = match to {
                    SubmissionState::Submitting => Some("Signing in...".to_string()),
                    SubmissionState::Succeeded => Some("Signed in".to_string()),
                    _ => None,
                };
            }
            AppEvent::AuthFinished { attempt, result } => {
                // A stale result must not drop the handle of a newer call
                if self.controller.finish_submission(attempt, result) {
                    self.auth_task = None;
                }
            }
            AppEvent::Activity(entry) => {
                if let Some(tx) = &self.activity_tx {
                    if tx.send(entry).is_err() {
                        tracing::warn!("Activity log writer has stopped");
                    }
                }
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return;
        }
        // Any key skips the entrance
        if self.in_entrance() {
            self.skip_entrance();
            return;
        }

        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Register => self.handle_register_key(key),
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.start_submission(),
            KeyCode::Esc => {
                if !self.cancel_submission() && !self.controller.sign_out() {
                    self.controller.clear_errors();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.controller.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.controller.focus_prev(),
            TOGGLE_PASSWORD_KEY => self.controller.toggle_password_visibility(),
            FORGOT_PASSWORD_KEY => self.controller.forgot_password(),
            SIGN_UP_KEY => self.open_registration(),
            GOOGLE_KEY => self.controller.social_login(Provider::Google),
            APPLE_KEY => self.controller.social_login(Provider::Apple),
            KeyCode::Char(' ') if self.controller.form().focus() == Focus::Remember => {
                self.controller.toggle_remember();
            }
            KeyCode::Char(c) => {
                if let Some(name) = self.active_field_name() {
                    self.controller.input_char(&name, c);
                }
            }
            KeyCode::Backspace => {
                if let Some(name) = self.active_field_name() {
                    self.controller.delete_char(&name);
                }
            }
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                if self.registration.submit() {
                    self.screen = Screen::Login;
                }
            }
            KeyCode::Esc => {
                self.registration.reset();
                self.screen = Screen::Login;
            }
            KeyCode::Tab | KeyCode::Down => self.registration.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.registration.focus_prev(),
            TOGGLE_PASSWORD_KEY => self.registration.toggle_password_visibility(),
            KeyCode::Char(c) => self.registration.input_char(c),
            KeyCode::Backspace => self.registration.delete_char(),
            _ => {}
        }
    }

    /// Show the sign-up form; only the idle or failed login form can be left
    fn open_registration(&mut self) {
        if !self.controller.state().accepts_submit() {
            return;
        }
        self.controller.sign_up();
        self.screen = Screen::Register;
    }

    fn active_field_name(&self) -> Option<String> {
        self.controller.form().active_field().map(|f| f.name.clone())
    }

    /// Submit the form and run the sign-in call in the background
    fn start_submission(&mut self) {
        let Some(PendingAttempt { id, credentials }) = self.controller.submit() else {
            return;
        };
        let call = self.controller.authenticate(credentials);
        let tx = self.events_tx.clone();
        self.auth_task = Some(tokio::spawn(async move {
            let result = call.await;
            let _ = tx.send(AppEvent::AuthFinished {
                attempt: id,
                result,
            });
        }));
    }

    /// Abort the outstanding sign-in call, if any
    fn cancel_submission(&mut self) -> bool {
        if !self.controller.cancel_submission() {
            return false;
        }
        if let Some(task) = self.auth_task.take() {
            task.abort();
        }
        true
    }
}
