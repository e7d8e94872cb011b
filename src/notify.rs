use std::time::{Duration, Instant};

/// Default auto-dismiss interval in milliseconds.
pub const DEFAULT_TOAST_MS: i64 = 5000;

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    deadline: Option<Instant>,
}

impl Toast {
    pub fn is_sticky(&self) -> bool {
        self.deadline.is_none()
    }
}

/// Ordered queue of auto-dismissing notifications.
///
/// Ids come from a monotonically increasing counter so rapid successive
/// notifications never collide. A duration of zero or less means the toast
/// never auto-dismisses and must be closed manually.
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: ToastId,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_at(
        &mut self,
        kind: ToastKind,
        message: impl Into<String>,
        duration_ms: i64,
        now: Instant,
    ) -> ToastId {
        self.next_id += 1;
        let id = self.next_id;
        let deadline = if duration_ms > 0 {
            Some(now + Duration::from_millis(duration_ms as u64))
        } else {
            None
        };
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            deadline,
        });
        id
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        self.push_at(kind, message, DEFAULT_TOAST_MS, Instant::now())
    }

    /// Remove a toast by id, e.g. when the user closes it. Once removed, its
    /// scheduled deadline is inert; a later sweep cannot remove it twice.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Remove every toast whose deadline has passed; returns how many expired.
    pub fn sweep(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts
            .retain(|t| t.deadline.map(|d| now < d).unwrap_or(true));
        before - self.toasts.len()
    }

    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }
}

/// Explicitly passed notification sink, so pages and forms do not depend on a
/// concrete toast queue.
pub trait Notifier {
    fn notify(&mut self, kind: ToastKind, message: &str);

    fn success(&mut self, message: &str) {
        self.notify(ToastKind::Success, message);
    }

    fn error(&mut self, message: &str) {
        self.notify(ToastKind::Error, message);
    }

    fn warning(&mut self, message: &str) {
        self.notify(ToastKind::Warning, message);
    }

    fn info(&mut self, message: &str) {
        self.notify(ToastKind::Info, message);
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        self.push(kind, message);
    }
}

/// Notifier for headless contexts: routes messages to the tracing output.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, kind: ToastKind, message: &str) {
        match kind {
            ToastKind::Error => tracing::error!("{message}"),
            ToastKind::Warning => tracing::warn!("{message}"),
            ToastKind::Success | ToastKind::Info => tracing::info!("{message}"),
        }
    }
}
