//! Notification seam for processed files.
//!
//! Actual delivery (email, chat webhook) lives outside this crate; the
//! pipeline only talks to the trait.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
}

/// Receives the formatted transcript summary once a file is processed.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, file_id: &str, summary: &str) -> Result<(), NotifyError>;
}

/// Reference implementation that records the notification in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, file_id: &str, summary: &str) -> Result<(), NotifyError> {
        info!(
            "Transcript ready for {} ({} lines)",
            file_id,
            summary.lines().count()
        );
        Ok(())
    }
}
