//! Notification sink emitting user-facing messages through tracing.
//!
//! Stands in for the storefront's toast surface when the workflow runs
//! headless; hosts with a real notification UI implement
//! [`Notifier`](crate::domain::ports::Notifier) directly.

use crate::domain::ports::Notifier;

/// Notifier forwarding messages to the `tracing` error stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn error(&self, message: &str) {
        tracing::error!(target: "registration::notify", "{message}");
    }
}
