//! Error types for slotwise

use thiserror::Error;

/// Core error type for slotwise utility operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotwiseError {
    #[error("Parsing error: {0}")]
    Parsing(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlotwiseError {
    pub fn parsing(msg: impl Into<String>) -> Self {
        Self::Parsing(msg.into())
    }

    pub fn invalid_duration(msg: impl Into<String>) -> Self {
        Self::InvalidDuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, SlotwiseError>;
