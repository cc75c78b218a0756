use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::jwt::TokenCodec;

/// Persistence collaborator resolving a token subject to a principal.
#[async_trait]
pub trait PrincipalLookup: Send + Sync + 'static {
    type Principal: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn find_by_subject(&self, subject: &str)
        -> Result<Option<Self::Principal>, Self::Error>;
}

/// Identity resolution failures.
///
/// `Unauthenticated` is the single outward signal for every token problem
/// and for unknown subjects. Lookup failures are passed through untouched.
#[derive(Debug, Error)]
pub enum IdentityError<E: std::error::Error + 'static> {
    #[error("Could not validate credentials")]
    Unauthenticated,

    #[error("Inactive user")]
    Inactive,

    #[error("Principal lookup failed: {0}")]
    Lookup(#[source] E),
}

/// Turns an `Authorization` header into an authenticated principal.
///
/// Extract, decode, read subject, look up. Any failure short-circuits with
/// `Unauthenticated`; nothing is cached between calls.
pub struct IdentityResolver<L> {
    codec: Arc<TokenCodec>,
    lookup: Arc<L>,
}

impl<L> Clone for IdentityResolver<L> {
    fn clone(&self) -> Self {
        Self {
            codec: Arc::clone(&self.codec),
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: PrincipalLookup> IdentityResolver<L> {
    pub fn new(codec: Arc<TokenCodec>, lookup: Arc<L>) -> Self {
        Self { codec, lookup }
    }

    /// Resolve the principal behind an `Authorization` header value.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, `None` when the header is absent
    ///
    /// # Errors
    /// * `Unauthenticated` - Missing or malformed header, invalid token,
    ///   missing subject, or unknown principal
    /// * `Lookup` - Persistence collaborator failed
    pub async fn resolve(
        &self,
        authorization: Option<&str>,
    ) -> Result<L::Principal, IdentityError<L::Error>> {
        let Some(token) = authorization.and_then(bearer_token) else {
            tracing::debug!(reason = "missing_credentials", "Request rejected");
            return Err(IdentityError::Unauthenticated);
        };

        let claims = self
            .codec
            .decode(token)
            .map_err(|_| IdentityError::Unauthenticated)?;

        let Some(subject) = claims.subject() else {
            tracing::warn!(reason = "missing_subject", "Request rejected");
            return Err(IdentityError::Unauthenticated);
        };

        match self.lookup.find_by_subject(subject).await {
            Ok(Some(principal)) => Ok(principal),
            Ok(None) => {
                tracing::warn!(reason = "unknown_principal", "Request rejected");
                Err(IdentityError::Unauthenticated)
            }
            Err(e) => {
                tracing::error!(error = %e, "Principal lookup failed");
                Err(IdentityError::Lookup(e))
            }
        }
    }
}

/// Extract the credential from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively; the credential must be a single
/// non-empty word.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, credentials) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = credentials.trim();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return None;
    }

    Some(token)
}
