//! Sync-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Configuration error: {field}")]
    ConfigurationError { field: String },

    #[error("Local registry operation failed: {message}")]
    RegistryError { message: String },

    #[error("AMS portal operation failed: {message}")]
    PortalError { message: String },

    #[error("Mail delivery failed: {message}")]
    MailError { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SyncError {
    pub fn config(field: impl Into<String>) -> Self {
        Self::ConfigurationError { field: field.into() }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::RegistryError { message: message.into() }
    }

    pub fn portal(message: impl Into<String>) -> Self {
        Self::PortalError { message: message.into() }
    }

    pub fn mail(message: impl Into<String>) -> Self {
        Self::MailError { message: message.into() }
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
