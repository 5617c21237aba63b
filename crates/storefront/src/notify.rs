//! Transient user-facing notifications.
//!
//! Notifications expire on a timer (3 seconds) or by explicit dismissal,
//! whichever comes first. The center is a clone-able handle over shared
//! state so the expiry task can remove entries after the posting call has
//! long returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::debug;

use minimart_core::{NotificationId, Severity};

/// How long a notification stays visible unless dismissed.
pub const DISPLAY_DURATION: Duration = Duration::from_secs(3);

/// One transient message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

/// The notification queue.
///
/// Display order is insertion order; identical messages are not
/// de-duplicated - every `post` produces a new entry.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    inner: Arc<CenterInner>,
}

#[derive(Default)]
struct CenterInner {
    next_id: AtomicU64,
    entries: Mutex<Vec<Notification>>,
}

impl NotificationCenter {
    /// Create an empty notification center.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a message and schedule its automatic removal.
    ///
    /// The removal is a timer task, not a blocking wait. Outside a tokio
    /// runtime the entry is still posted; it just stays until explicitly
    /// dismissed.
    pub fn post(&self, message: impl Into<String>, severity: Severity) -> NotificationId {
        let id = NotificationId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        self.lock_entries().push(notification);

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let center = self.clone();
            handle.spawn(async move {
                tokio::time::sleep(DISPLAY_DURATION).await;
                center.dismiss(id);
            });
        }

        id
    }

    /// Remove a notification before its timer fires. No-op when already
    /// gone (expired or dismissed).
    pub fn dismiss(&self, id: NotificationId) {
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|n| n.id != id);
        if entries.len() != before {
            debug!(%id, "dismissed notification");
        }
    }

    /// Snapshot of the currently visible notifications, insertion order.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        self.lock_entries().clone()
    }

    /// Whether a notification is still visible.
    #[must_use]
    pub fn is_visible(&self, id: NotificationId) -> bool {
        self.lock_entries().iter().any(|n| n.id == id)
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
