//! User-visible notification capability.
//!
//! The controller never renders anything itself; it reports outcomes
//! through an injected [`Notifier`]. A UI layer typically maps these to
//! toasts. Keeping the capability behind a trait lets the core logic be
//! tested without any UI.

use tracing::{info, warn};

/// Receiver for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// Neutral informational message.
    fn info(&self, message: &str);

    /// Confirmation of a completed action.
    fn success(&self, message: &str);

    /// A failure the user should know about.
    fn error(&self, message: &str);
}

/// Notifier that forwards messages to `tracing`.
///
/// Useful for headless runs and as a default; real UIs inject their own
/// implementation.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn info(&self, message: &str) {
        info!(kind = "info", "{message}");
    }

    fn success(&self, message: &str) {
        info!(kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(kind = "error", "{message}");
    }
}
