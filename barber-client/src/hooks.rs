//! UI side effects triggered by the HTTP client
//!
//! The client does not render anything itself: it reports toasts through a
//! [`Notifier`] and asks a [`Navigator`] to leave the current screen when the
//! session is rejected.

use std::sync::Mutex;

/// Route the client navigates to when the backend answers 401
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// Transient user notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Success,
            message: message.to_string(),
        });
    }

    fn error(&self, message: &str) {
        self.notify(Toast {
            level: ToastLevel::Error,
            message: message.to_string(),
        });
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Notifier that writes toasts to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => tracing::info!(message = %toast.message, "toast"),
            ToastLevel::Error => tracing::warn!(message = %toast.message, "toast"),
        }
    }
}

/// Navigator that only logs the requested route
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, path: &str) {
        tracing::info!(path, "navigate");
    }
}

/// Notifier keeping toasts in memory until the screen drains them
#[derive(Debug, Default)]
pub struct ToastQueue {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending toast
    pub fn drain(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(mut toasts) => std::mem::take(&mut *toasts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Copy of the pending toasts
    pub fn snapshot(&self) -> Vec<Toast> {
        match self.toasts.lock() {
            Ok(toasts) => toasts.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, toast: Toast) {
        match self.toasts.lock() {
            Ok(mut toasts) => toasts.push(toast),
            Err(poisoned) => poisoned.into_inner().push(toast),
        }
    }
}
