//! Simulated authentication backend
//!
//! Stands in for a real identity service: waits for a configurable
//! latency, then checks the pair against an in-memory account table.
//! Accounts created through registration are accepted right away.

use super::registry::{AccountRegistry, Registration, RegistrationError};
use super::traits::{AuthClient, AuthError, AuthSession, Credentials};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Reason given for any unknown account or wrong password
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Client that accepts the configured demo accounts plus registered ones
pub struct SimulatedAuthClient {
    /// Known accounts, email to password
    users: RwLock<HashMap<String, String>>,
    /// Artificial delay before answering
    latency: Duration,
}

impl SimulatedAuthClient {
    pub fn new(users: HashMap<String, String>, latency: Duration) -> Self {
        Self {
            users: RwLock::new(users),
            latency,
        }
    }

    fn users(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        match self.users.read() {
            Ok(users) => users,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn users_mut(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        match self.users.write() {
            Ok(users) => users,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn check(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        let email = credentials.email.trim();
        match self.users().get(email) {
            Some(password) if password == credentials.password.expose_secret() => {
                Ok(AuthSession::new(email))
            }
            _ => Err(AuthError::Rejected(INVALID_CREDENTIALS.to_string())),
        }
    }
}

#[async_trait]
impl AuthClient for SimulatedAuthClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthSession, AuthError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let result = self.check(credentials);
        tracing::info!(email = %credentials.email, ok = result.is_ok(), "Login attempt checked");
        result
    }
}

impl AccountRegistry for SimulatedAuthClient {
    fn register(&self, registration: &Registration) -> Result<(), RegistrationError> {
        registration.check()?;
        let email = registration.email.trim();
        let mut users = self.users_mut();
        if users.contains_key(email) {
            return Err(RegistrationError::AlreadyExists);
        }
        users.insert(
            email.to_string(),
            registration.password.expose_secret().to_string(),
        );
        tracing::info!(email, "Account registered");
        Ok(())
    }
}
