//! Trait abstraction for the authentication backend to enable mocking in tests

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;

/// Message shown when a failure carries no reason of its own
pub const DEFAULT_FAILURE_MESSAGE: &str = "Login failed. Please try again.";

/// Snapshot of the form taken when a submission starts.
///
/// Moved into the authentication future and dropped with it, so the
/// password does not outlive the attempt.
#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Both parts are present (non-blank after trimming)
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.expose_secret().trim().is_empty()
    }
}

/// A successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub email: String,
    pub authenticated_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            authenticated_at: Utc::now(),
        }
    }
}

/// Failure channel of an authentication attempt
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend refused the credentials
    #[error("{0}")]
    Rejected(String),
    /// No answer arrived within the configured timeout
    #[error("Login timed out after {}. Please try again.", format_timeout(.0))]
    TimedOut(Duration),
    /// The user aborted the pending attempt
    #[error("Sign-in cancelled")]
    Cancelled,
}

/// Whole seconds when exact, milliseconds otherwise
fn format_timeout(limit: &Duration) -> String {
    if limit.subsec_millis() == 0 {
        format!("{}s", limit.as_secs())
    } else {
        format!("{}ms", limit.as_millis())
    }
}

impl AuthError {
    /// Message to surface to the user, never blank
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(reason) if reason.trim().is_empty() => {
                DEFAULT_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }
}

/// Credential verification capability.
///
/// Implementations must report every failure through the returned
/// `AuthError`; there is no other error channel.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Verify a credential pair
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthSession, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod credentials {
        use super::*;

        #[test]
        fn test_complete_when_both_present() {
            let creds = Credentials::new("a@b.com", "x");
            assert!(creds.is_complete());
        }

        #[test]
        fn test_incomplete_when_blank() {
            assert!(!Credentials::new("  ", "secret1").is_complete());
            assert!(!Credentials::new("a@b.com", "   ").is_complete());
        }

        #[test]
        fn test_debug_does_not_leak_password() {
            let creds = Credentials::new("a@b.com", "hunter22");
            let debug_str = format!("{:?}", creds);
            assert!(debug_str.contains("a@b.com"));
            assert!(!debug_str.contains("hunter22"));
        }
    }

    mod auth_error {
        use super::*;

        #[test]
        fn test_rejected_keeps_reason() {
            let err = AuthError::Rejected("bad password".to_string());
            assert_eq!(err.user_message(), "bad password");
        }

        #[test]
        fn test_blank_rejection_uses_default() {
            let err = AuthError::Rejected("  ".to_string());
            assert_eq!(err.user_message(), DEFAULT_FAILURE_MESSAGE);
        }

        #[test]
        fn test_timeout_message_mentions_seconds() {
            let err = AuthError::TimedOut(Duration::from_secs(10));
            assert!(err.user_message().contains("10s"));
        }

        #[test]
        fn test_sub_second_timeout_message_uses_millis() {
            let err = AuthError::TimedOut(Duration::from_millis(500));
            assert_eq!(
                err.user_message(),
                "Login timed out after 500ms. Please try again."
            );
            let err = AuthError::TimedOut(Duration::from_millis(1500));
            assert!(err.user_message().contains("1500ms"));
        }
    }
}
