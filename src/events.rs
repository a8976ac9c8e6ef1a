//! Events delivered to the application loop

use crate::auth::{AuthError, AuthSession, LogEntry};
use crate::state::SubmissionState;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The form moved between two submission states
    StateChanged {
        from: SubmissionState,
        to: SubmissionState,
    },
    /// A spawned authentication call completed
    AuthFinished {
        attempt: u64,
        result: Result<AuthSession, AuthError>,
    },
    /// Account activity to append to the activity log
    Activity(LogEntry),
}
