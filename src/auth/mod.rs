//! Authentication capability and its simulated backend

mod attempt_log;
mod client;
mod registry;
mod traits;

pub use attempt_log::{ActivityKind, AttemptLog, AttemptStatus, LogEntry};
pub use client::SimulatedAuthClient;
pub use registry::{AccountRegistry, Registration, RegistrationError};
pub use traits::{AuthClient, AuthError, AuthSession, Credentials};

#[cfg(test)]
pub use registry::MockAccountRegistry;
#[cfg(test)]
pub use traits::{MockAuthClient, DEFAULT_FAILURE_MESSAGE};
