//! Transient notifications (toasts)

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Toasts kept at once; older ones are dropped first
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Identifies the form a notification is about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormHandle {
    pub id: Uuid,
    pub name: String,
}

impl FormHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Fire-and-forget message display
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str, severity: Severity, context: &FormHandle);
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub form: FormHandle,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= ttl
    }
}

/// Sink that keeps notifications for the renderer to draw
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    queue: Arc<Mutex<VecDeque<Notification>>>,
    ttl: Duration,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            queue: Arc::new(Mutex::new(VecDeque::new())),
            ttl,
        }
    }

    /// Lock the queue, recovering it if a holder panicked
    fn lock(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        match self.queue.lock() {
            Ok(queue) => queue,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn push_at(&self, notification: Notification) {
        let mut queue = self.lock();
        queue.push_back(notification);
        while queue.len() > MAX_VISIBLE {
            queue.pop_front();
        }
    }

    /// Drop notifications older than the time-to-live
    pub fn prune(&self, now: Instant) {
        let ttl = self.ttl;
        self.lock().retain(|n| !n.is_expired(now, ttl));
    }

    /// Notifications still on screen, oldest first
    pub fn visible(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, message: &str, severity: Severity, context: &FormHandle) {
        match severity {
            Severity::Error => tracing::warn!(form = %context.name, "{message}"),
            _ => tracing::info!(form = %context.name, "{message}"),
        }
        self.push_at(Notification {
            message: message.to_string(),
            severity,
            form: context.clone(),
            created_at: Instant::now(),
        });
    }
}
