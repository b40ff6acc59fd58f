//! Toast notifications.
//!
//! # Invariants
//! - Toasts stack in arrival order and expire independently.
//! - Dismissing an unknown or already expired toast is a no-op.

use crate::config::CoreConfig;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToastId(Uuid);

impl ToastId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub duration: Duration,
    pub shown_at: Instant,
}

impl Toast {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// Fire-and-forget user notification.
pub trait Notifier {
    /// Shows `message`; `duration = None` uses the notifier default.
    fn show_toast(&mut self, message: &str, kind: ToastKind, duration: Option<Duration>) -> ToastId;
}

/// In-memory toast stack.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    default_duration: Duration,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastQueue {
    pub fn new(default_duration: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            default_duration,
        }
    }

    /// Queue whose default duration is `toast_duration` from `config`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.toast_duration)
    }

    /// Visible toasts, oldest first.
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        before != self.toasts.len()
    }

    /// Drops toasts whose duration has elapsed at `now`.
    pub fn prune_expired(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|toast| !toast.is_expired(now));
        before - self.toasts.len()
    }

    /// Removes and returns every toast, e.g. to hand them to a UI shell.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.toasts)
    }
}

impl Notifier for ToastQueue {
    fn show_toast(&mut self, message: &str, kind: ToastKind, duration: Option<Duration>) -> ToastId {
        let toast = Toast {
            id: ToastId::new(),
            message: message.to_string(),
            kind,
            duration: duration.unwrap_or(self.default_duration),
            shown_at: Instant::now(),
        };
        let id = toast.id;
        self.toasts.push(toast);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::{Notifier, ToastKind, ToastQueue};
    use crate::config::{CoreConfig, ENV_TOAST_MS};
    use std::time::Duration;

    #[test]
    fn toasts_stack_and_expire_independently() {
        let mut queue = ToastQueue::new(Duration::from_millis(3000));
        let short = queue.show_toast("Sauvegardé", ToastKind::Success, Some(Duration::from_millis(10)));
        let long = queue.show_toast("Erreur", ToastKind::Error, None);
        assert_eq!(queue.active().len(), 2);

        let later = queue.active()[0].shown_at + Duration::from_millis(50);
        assert_eq!(queue.prune_expired(later), 1);
        assert_eq!(queue.active()[0].id, long);
        assert!(!queue.dismiss(short));
        assert!(queue.dismiss(long));
        assert!(queue.active().is_empty());
    }

    #[test]
    fn configured_toast_duration_becomes_the_queue_default() {
        let config = CoreConfig::from_lookup(|key: &str| {
            (key == ENV_TOAST_MS).then(|| "500".to_string())
        })
        .unwrap();
        let mut queue = ToastQueue::from_config(&config);
        queue.show_toast("Sauvegardé", ToastKind::Success, None);
        queue.show_toast("Erreur", ToastKind::Error, Some(Duration::from_millis(40)));
        assert_eq!(queue.active()[0].duration, Duration::from_millis(500));
        assert_eq!(queue.active()[1].duration, Duration::from_millis(40));
    }
}
