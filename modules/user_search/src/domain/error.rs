use thiserror::Error;

use crate::contract::error::SearchErrorCode;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid search query: {code}")]
    InvalidQuery { code: SearchErrorCode },

    #[error("Dataset unavailable: {message}")]
    Dataset { message: String },
}

impl DomainError {
    pub fn invalid_query(code: SearchErrorCode) -> Self {
        Self::InvalidQuery { code }
    }

    pub fn dataset(message: impl Into<String>) -> Self {
        Self::Dataset {
            message: message.into(),
        }
    }
}
