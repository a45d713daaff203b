//! Shared error types for roster handling

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid member id: {input:?}")]
    InvalidMemberId { input: String },

    #[error("Logging setup failed: {message}")]
    LoggingError { message: String },
}

pub type SharedResult<T> = Result<T, SharedError>;
