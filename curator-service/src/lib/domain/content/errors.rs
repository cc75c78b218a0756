use thiserror::Error;

use crate::domain::content::models::ContentId;
use crate::domain::tag::errors::TagError;
use crate::domain::tag::errors::TagNameError;

/// Error type for ContentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for ContentTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentTitleError {
    #[error("Title is empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error type for ContentUrl validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContentUrlError {
    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Top-level error type for all content-related operations
#[derive(Debug, Clone, Error)]
pub enum ContentError {
    #[error("Invalid content ID: {0}")]
    InvalidContentId(#[from] ContentIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] ContentTitleError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] ContentUrlError),

    #[error("Invalid tag: {0}")]
    InvalidTag(#[from] TagNameError),

    #[error("Content not found: {0}")]
    NotFound(ContentId),

    #[error("Not authorized to perform this action")]
    Forbidden,

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<TagError> for ContentError {
    fn from(err: TagError) -> Self {
        match err {
            TagError::InvalidTagName(e) => ContentError::InvalidTag(e),
            TagError::DatabaseError(msg) => ContentError::DatabaseError(msg),
            other => ContentError::Unknown(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for ContentError {
    fn from(err: anyhow::Error) -> Self {
        ContentError::Unknown(err.to_string())
    }
}
