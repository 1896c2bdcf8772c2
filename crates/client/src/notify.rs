//! User-facing error notification.
//!
//! The checker never calls back on failure; it reports a human-readable
//! message through a [`Notifier`] instead. Front ends plug in whatever
//! surface they have (dialog, toast, stderr); the default just logs.

use std::sync::Arc;

/// Sink for human-readable error messages.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Emits every alert as a `tracing` error event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        tracing::error!(alert = %message, "Job status alert");
    }
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }
}
