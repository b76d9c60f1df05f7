//! Degraded-state tracking and user-facing notices
//!
//! The stores never hand UI strings back through their return values.
//! Outcomes a user should see as a toast (offline fallback engaged, status
//! changed, order created) are published on a broadcast channel, and the
//! current degraded/available state is a flag the UI can poll.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::broadcast;

const NOTICE_CAPACITY: usize = 64;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A user-facing notice (rendered as a toast by the UI layer)
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Shared backend-availability state and notice stream
///
/// One hub is shared by every store of a client so that a fallback detected
/// by, say, the order store is immediately visible to the food store.
#[derive(Debug)]
pub struct StatusHub {
    degraded: AtomicBool,
    notices: broadcast::Sender<Notice>,
}

impl StatusHub {
    pub fn new() -> Arc<Self> {
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Arc::new(Self {
            degraded: AtomicBool::new(false),
            notices,
        })
    }

    /// Subscribe to the notice stream
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Whether reads and writes are currently served from the fallback cache
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    /// Switch to degraded mode. Only the first entry emits the offline
    /// notice, repeat failures stay quiet.
    pub(crate) fn enter_degraded(&self, reason: &str) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            tracing::warn!(%reason, "remote service unreachable, switching to offline data");
            self.notify(
                NoticeLevel::Warning,
                "Remote service is not available. Using offline data.",
            );
        }
    }

    /// A successful remote call clears degraded mode.
    pub(crate) fn clear_degraded(&self) {
        if self.degraded.swap(false, Ordering::Relaxed) {
            tracing::info!("remote service reachable again");
            self.notify(NoticeLevel::Info, "Remote service is available again.");
        }
    }

    /// Publish a notice. Dropped silently when nobody is subscribed.
    pub(crate) fn notify(&self, level: NoticeLevel, message: impl Into<String>) {
        let _ = self.notices.send(Notice {
            level,
            message: message.into(),
        });
    }
}
