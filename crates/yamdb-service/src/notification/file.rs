//! Mail transport that drops each message into a directory as a `.eml` file.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use yamdb_core::AppResult;
use yamdb_core::error::{AppError, ErrorKind};
use yamdb_core::traits::{Notifier, OutgoingMail};

/// Writes one RFC 822 style file per message.
#[derive(Debug, Clone)]
pub struct FileNotifier {
    from_address: String,
    directory: PathBuf,
}

impl FileNotifier {
    /// Creates a file transport rooted at `directory`.
    pub fn new(from_address: impl Into<String>, directory: impl Into<PathBuf>) -> Self {
        Self {
            from_address: from_address.into(),
            directory: directory.into(),
        }
    }

    fn render(&self, mail: &OutgoingMail) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\n\r\n{}\r\n",
            self.from_address,
            mail.recipient,
            mail.subject,
            Utc::now().to_rfc2822(),
            mail.body
        )
    }
}

#[async_trait]
impl Notifier for FileNotifier {
    async fn send(&self, mail: &OutgoingMail) -> AppResult<()> {
        let delivery_failed = |e: std::io::Error| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to deliver mail", e)
        };

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(delivery_failed)?;

        let name = format!(
            "{}-{}.eml",
            Utc::now().format("%Y%m%d%H%M%S"),
            Uuid::new_v4().simple()
        );
        let path = self.directory.join(name);
        tokio::fs::write(&path, self.render(mail))
            .await
            .map_err(delivery_failed)?;

        debug!(path = %path.display(), to = %mail.recipient, "Mail written to file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_message_file() {
        let dir = std::env::temp_dir().join(format!("yamdb-mail-{}", Uuid::new_v4()));
        let notifier = FileNotifier::new("noreply@yamdb.local", &dir);
        let mail = OutgoingMail {
            recipient: "reader@example.com".to_string(),
            subject: "Your code".to_string(),
            body: "Your code: 123-abc".to_string(),
        };

        notifier.send(&mail).await.unwrap();

        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        let entry = entries.next_entry().await.unwrap().unwrap();
        let contents = tokio::fs::read_to_string(entry.path()).await.unwrap();
        assert!(contents.contains("To: reader@example.com"));
        assert!(contents.contains("Your code: 123-abc"));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
