//! Toast notifications shown after privileged actions
//!
//! Notifications are best effort. The service discards any error a notifier
//! returns.

use async_trait::async_trait;

/// Text of the toast shown after a privileged action ran
pub const PRIVILEGED_TOAST: &str = "Privileged action executed";

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn toast(&self, message: &str) -> anyhow::Result<()>;
}

/// Notifier that writes toasts to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn toast(&self, message: &str) -> anyhow::Result<()> {
        tracing::info!(toast = message, "Voice notification");
        Ok(())
    }
}
