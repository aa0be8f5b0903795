//! Error types for the logger

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while setting up log outputs
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("Failed to open log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install global subscriber: {message}")]
    Install { message: String },
}

impl LoggerError {
    pub fn install(message: impl Into<String>) -> Self {
        Self::Install {
            message: message.into(),
        }
    }
}
