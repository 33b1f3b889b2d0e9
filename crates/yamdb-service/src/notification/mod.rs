//! Outbound mail transports implementing [`Notifier`].

pub mod file;
pub mod log;

use std::sync::Arc;

use yamdb_core::config::MailConfig;
use yamdb_core::error::AppError;
use yamdb_core::traits::Notifier;

pub use file::FileNotifier;
pub use log::LogNotifier;

/// Build the transport named by `config.transport`.
pub fn build_notifier(config: &MailConfig) -> Result<Arc<dyn Notifier>, AppError> {
    match config.transport.as_str() {
        "console" => Ok(Arc::new(LogNotifier::new(&config.from_address))),
        "file" => Ok(Arc::new(FileNotifier::new(
            &config.from_address,
            &config.directory,
        ))),
        other => Err(AppError::configuration(format!(
            "Unknown mail transport '{other}'. Expected 'console' or 'file'"
        ))),
    }
}
