//! Notification sinks for user-facing cart errors.

use std::sync::{Arc, Mutex};

use turbo_commerce::CartError;

/// Receives the error of every failed cart operation.
///
/// This is where a UI shows its toast. Implementations must not block.
pub trait Notifier: Send + Sync {
    /// Surface a failed operation to the user.
    fn notify_error(&self, error: &CartError);
}

impl<F> Notifier for F
where
    F: Fn(&CartError) + Send + Sync,
{
    fn notify_error(&self, error: &CartError) {
        self(error)
    }
}

/// Routes notifications to the `tracing` pipeline at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_error(&self, error: &CartError) {
        tracing::warn!(kind = error.kind().as_str(), "{error}");
    }
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify_error(&self, _error: &CartError) {}
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    errors: Arc<Mutex<Vec<CartError>>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors received so far.
    pub fn errors(&self) -> Vec<CartError> {
        self.errors.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Messages received so far, as a user would have seen them.
    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, error: &CartError) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.push(*error);
        }
    }
}
