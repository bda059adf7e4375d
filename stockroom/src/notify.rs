//! Transient notification area.
//!
//! Each notification removes itself once its time-to-live elapses. Entries
//! stack in arrival order and identical messages are not merged.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,
}

/// Shared handle to the notification list.
///
/// Cloning yields another handle onto the same list. Must be used from within
/// a tokio runtime, since every notification schedules its own expiry.
#[derive(Debug, Clone)]
pub struct Notifier {
    entries: Arc<Mutex<Vec<Notification>>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Append a message and schedule its removal. Returns its id.
    pub fn notify(&self, message: impl Into<String>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let message = message.into();

        tracing::debug!(id, message = %message, "Notification added");
        self.entries.lock().push(Notification { id, message });

        let entries = Arc::clone(&self.entries);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            remove(&entries, id);
        });

        id
    }

    /// Remove a notification early. Returns false if it was already gone.
    pub fn dismiss(&self, id: u64) -> bool {
        remove(&self.entries, id)
    }

    /// Current notifications, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

fn remove(entries: &Mutex<Vec<Notification>>, id: u64) -> bool {
    let mut entries = entries.lock();
    let before = entries.len();
    entries.retain(|n| n.id != id);
    before != entries.len()
}
