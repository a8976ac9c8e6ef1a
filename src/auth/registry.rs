//! Account registration capability

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

/// Sign-up form snapshot
#[derive(Debug)]
pub struct Registration {
    pub email: String,
    pub password: SecretString,
    pub confirm: SecretString,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
            confirm: SecretString::from(confirm.into()),
        }
    }

    /// Check the snapshot on its own, before looking at existing accounts
    pub fn check(&self) -> Result<(), RegistrationError> {
        let password = self.password.expose_secret();
        let confirm = self.confirm.expose_secret();
        if self.email.trim().is_empty() || password.is_empty() || confirm.is_empty() {
            return Err(RegistrationError::MissingFields);
        }
        if password != confirm {
            return Err(RegistrationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("This user already exists")]
    AlreadyExists,
}

/// Creates accounts that the authentication backend then accepts
#[cfg_attr(test, mockall::automock)]
pub trait AccountRegistry: Send + Sync {
    fn register(&self, registration: &Registration) -> Result<(), RegistrationError>;
}
