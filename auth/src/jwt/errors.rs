use thiserror::Error;

/// Error type for token operations.
///
/// Every verification failure surfaces as `Invalid`; the concrete cause is
/// only logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Missing required claim: sub")]
    MissingSubject,

    #[error("Claim is set by the codec and must not be provided: {0}")]
    ReservedClaim(&'static str),

    #[error("Invalid token")]
    Invalid,
}

/// Error raised while building the codec from configuration.
///
/// Fatal at startup: a process without a usable signing setup must not serve
/// traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Signing secret is missing or empty")]
    MissingSecret,

    #[error("Unsupported signing algorithm: {0} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(String),

    #[error("Access token lifetime must be positive, got {0} seconds")]
    InvalidTtl(i64),
}
