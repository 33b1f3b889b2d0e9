//! Outbound notification trait used to deliver confirmation codes.

use async_trait::async_trait;

use crate::result::AppResult;

/// A single plain-text message addressed to one recipient.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutgoingMail {
    /// Recipient email address.
    pub recipient: String,
    /// Subject line.
    pub subject: String,
    /// Message body.
    pub body: String,
}

/// Trait for mail transports (console log, file drop, or test recorders).
///
/// A failed delivery must surface as an error so the caller can fail the
/// request instead of leaving the user without a code.
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a message.
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()>;
}
