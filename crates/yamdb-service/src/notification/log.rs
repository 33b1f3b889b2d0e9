//! Mail transport that writes messages to the log.

use async_trait::async_trait;
use tracing::info;

use yamdb_core::AppResult;
use yamdb_core::traits::{Notifier, OutgoingMail};

/// Logs every outgoing mail at info level.
#[derive(Debug, Clone)]
pub struct LogNotifier {
    from_address: String,
}

impl LogNotifier {
    /// Creates a console transport.
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
        }
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        info!(
            from = %self.from_address,
            to = %mail.recipient,
            subject = %mail.subject,
            body = %mail.body,
            "Outgoing mail"
        );
        Ok(())
    }
}
