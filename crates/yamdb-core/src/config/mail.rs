//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Confirmation-code delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Transport: `"console"` (log the message) or `"file"` (one file per message).
    #[serde(default = "default_transport")]
    pub transport: String,
    /// Sender address written into every message.
    #[serde(default = "default_from")]
    pub from_address: String,
    /// Target directory for the file transport.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Subject line of the confirmation mail.
    #[serde(default = "default_subject")]
    pub subject: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            from_address: default_from(),
            directory: default_directory(),
            subject: default_subject(),
        }
    }
}

fn default_transport() -> String {
    "console".to_string()
}

fn default_from() -> String {
    "noreply@yamdb.local".to_string()
}

fn default_directory() -> String {
    "data/sent_emails".to_string()
}

fn default_subject() -> String {
    "Your YaMDb confirmation code".to_string()
}
