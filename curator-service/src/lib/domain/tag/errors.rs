use thiserror::Error;

use crate::domain::tag::models::TagId;

/// Error type for TagId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for TagName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TagNameError {
    #[error("Tag name is empty")]
    Empty,

    #[error("Tag name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all tag-related operations
#[derive(Debug, Clone, Error)]
pub enum TagError {
    #[error("Invalid tag ID: {0}")]
    InvalidTagId(#[from] TagIdError),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(#[from] TagNameError),

    #[error("Tag not found: {0}")]
    NotFound(TagId),

    #[error("Tag with this name already exists")]
    NameAlreadyExists(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TagError {
    fn from(err: anyhow::Error) -> Self {
        TagError::Unknown(err.to_string())
    }
}
