//! Transient save notifications.
//!
//! A notifier shows at most one message at a time. Each message clears itself
//! after a fixed delay. Replacing or dismissing a message, or dropping the
//! notifier, cancels the pending dismissal.
//!
//! `show` spawns onto the current tokio runtime and must be called from
//! within one.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;

/// Default time a notification stays visible.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NotificationKind::Success => write!(f, "✓ {}", self.message),
            NotificationKind::Error => write!(f, "✗ {}", self.message),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    current: Option<Notification>,
}

type SharedSlot = Arc<Mutex<Slot>>;

fn lock(slot: &SharedSlot) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug)]
pub struct Notifier {
    slot: SharedSlot,
    pending: Option<JoinHandle<()>>,
    dismiss_after: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_DISMISS_AFTER)
    }
}

impl Notifier {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            slot: SharedSlot::default(),
            pending: None,
            dismiss_after,
        }
    }

    /// Shows `notification`, replacing any current one.
    pub fn show(&mut self, notification: Notification) {
        self.cancel_pending();

        let generation = {
            let mut slot = lock(&self.slot);
            slot.generation += 1;
            slot.current = Some(notification);
            slot.generation
        };

        let slot = Arc::clone(&self.slot);
        let delay = self.dismiss_after;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut slot = lock(&slot);
            // A newer notification owns the slot now.
            if slot.generation == generation {
                slot.current = None;
            }
        }));
    }

    pub fn dismiss(&mut self) {
        self.cancel_pending();
        lock(&self.slot).current = None;
    }

    pub fn current(&self) -> Option<Notification> {
        lock(&self.slot).current.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Notifier {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    async fn settle() {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_notification_auto_dismisses() {
        let mut notifier = Notifier::default();
        notifier.show(Notification::success("Preferences saved"));

        sleep(Duration::from_millis(1900)).await;
        assert_eq!(
            notifier.current(),
            Some(Notification::success("Preferences saved"))
        );

        sleep(Duration::from_millis(200)).await;
        settle().await;
        assert_eq!(notifier.current(), None);
        assert!(!notifier.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replacing_cancels_previous_dismissal() {
        let mut notifier = Notifier::default();
        notifier.show(Notification::success("First"));

        sleep(Duration::from_millis(1500)).await;
        notifier.show(Notification::error("Second"));

        // Past the first notification's deadline
        sleep(Duration::from_millis(600)).await;
        settle().await;
        assert_eq!(notifier.current(), Some(Notification::error("Second")));

        sleep(Duration::from_millis(1500)).await;
        settle().await;
        assert_eq!(notifier.current(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_clears_immediately() {
        let mut notifier = Notifier::new(Duration::from_millis(500));
        notifier.show(Notification::success("Saved"));
        assert!(notifier.is_pending());

        notifier.dismiss();
        assert_eq!(notifier.current(), None);
        assert!(!notifier.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_dismissal() {
        let mut notifier = Notifier::default();
        notifier.show(Notification::success("Saved"));
        let slot = Arc::clone(&notifier.slot);

        drop(notifier);
        sleep(Duration::from_millis(2500)).await;
        settle().await;

        // The timer never ran, so the message was never cleared
        assert!(lock(&slot).current.is_some());
    }

    #[test]
    fn test_display() {
        assert_eq!(Notification::success("Saved").to_string(), "✓ Saved");
        assert_eq!(Notification::error("Failed").to_string(), "✗ Failed");
    }
}
