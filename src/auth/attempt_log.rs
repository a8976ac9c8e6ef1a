//! Append-only log of account activity (sign-in, registration, sign-out)

use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::fmt;
use std::path::PathBuf;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, UnboundedSender};

/// Kind of activity recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Login,
    Register,
    Logout,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityKind::Login => write!(f, "LOGIN"),
            ActivityKind::Register => write!(f, "REGISTER"),
            ActivityKind::Logout => write!(f, "LOGOUT"),
        }
    }
}

/// Outcome recorded for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Success,
    Failed,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptStatus::Success => write!(f, "success"),
            AttemptStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One line of the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub kind: ActivityKind,
    pub email: String,
    pub status: AttemptStatus,
    pub at: NaiveDateTime,
}

impl LogEntry {
    /// Entry stamped with the local time
    pub fn now(kind: ActivityKind, email: impl Into<String>, status: AttemptStatus) -> Self {
        Self {
            kind,
            email: email.into(),
            status,
            at: Local::now().naive_local(),
        }
    }

    /// `[YYYY-mm-dd HH:MM:SS] KIND | email | status`; a blank email is logged as `unknown`
    pub fn line(&self) -> String {
        let email = if self.email.trim().is_empty() {
            "unknown"
        } else {
            self.email.trim()
        };
        format!(
            "[{}] {} | {} | {}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.kind,
            email,
            self.status
        )
    }
}

/// Log file location; writes go through the async runtime
#[derive(Debug, Clone)]
pub struct AttemptLog {
    path: PathBuf,
}

impl AttemptLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one entry, creating the parent directory on first use
    pub async fn append(&self, entry: &LogEntry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", entry.line()).as_bytes())
            .await?;
        file.flush().await?;
        Ok(())
    }

    /// Spawn a writer task that appends entries in the order they are sent.
    ///
    /// Must be called from within a Tokio runtime. Write failures are logged
    /// and never stop the writer.
    pub fn spawn_writer(self) -> UnboundedSender<LogEntry> {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogEntry>();
        tokio::spawn(async move {
            while let Some(entry) = rx.recv().await {
                if let Err(e) = self.append(&entry).await {
                    tracing::warn!("Failed to write activity log {:?}: {e}", self.path);
                }
            }
        });
        tx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::time::Duration;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap()
    }

    fn entry(kind: ActivityKind, email: &str, status: AttemptStatus) -> LogEntry {
        LogEntry {
            kind,
            email: email.to_string(),
            status,
            at: fixed_time(),
        }
    }

    fn temp_log_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("neon-login-test-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_login_line() {
        let line = entry(ActivityKind::Login, "admin@cyberlab.com", AttemptStatus::Success).line();
        assert_eq!(line, "[2024-03-09 14:05:07] LOGIN | admin@cyberlab.com | success");
    }

    #[test]
    fn test_register_and_logout_lines() {
        let register = entry(ActivityKind::Register, "new@cyberlab.com", AttemptStatus::Success);
        assert!(register.line().ends_with("REGISTER | new@cyberlab.com | success"));
        let logout = entry(ActivityKind::Logout, "new@cyberlab.com", AttemptStatus::Success);
        assert!(logout.line().ends_with("LOGOUT | new@cyberlab.com | success"));
    }

    #[test]
    fn test_blank_email_logged_as_unknown() {
        let line = entry(ActivityKind::Login, "  ", AttemptStatus::Failed).line();
        assert!(line.ends_with("LOGIN | unknown | failed"));
    }

    #[tokio::test]
    async fn test_append_adds_lines() {
        let path = temp_log_path("connections.log");
        let log = AttemptLog::new(&path);

        log.append(&entry(ActivityKind::Login, "a@b.com", AttemptStatus::Failed))
            .await
            .unwrap();
        log.append(&entry(ActivityKind::Login, "a@b.com", AttemptStatus::Success))
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("| failed"));
        assert!(lines[1].ends_with("| success"));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[tokio::test]
    async fn test_writer_keeps_order() {
        let path = temp_log_path("connections.log");
        let tx = AttemptLog::new(&path).spawn_writer();

        for kind in [ActivityKind::Register, ActivityKind::Login, ActivityKind::Logout] {
            tx.send(entry(kind, "a@b.com", AttemptStatus::Success)).unwrap();
        }

        let mut content = String::new();
        for _ in 0..100 {
            content = std::fs::read_to_string(&path).unwrap_or_default();
            if content.lines().count() == 3 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let kinds: Vec<&str> = content
            .lines()
            .filter_map(|l| l.split(' ').nth(2))
            .collect();
        assert_eq!(kinds, vec!["REGISTER", "LOGIN", "LOGOUT"]);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(AttemptStatus::Success.to_string(), "success");
        assert_eq!(AttemptStatus::Failed.to_string(), "failed");
        assert_eq!(ActivityKind::Register.to_string(), "REGISTER");
    }
}
