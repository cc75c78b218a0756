use std::sync::Arc;

use crate::jwt::Claims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Token type reported alongside every issued access token.
pub const BEARER_TOKEN_TYPE: &str = "bearer";

/// Authentication coordinator combining password verification and token issuance.
///
/// Hashing is CPU-bound; async callers should run these methods on a blocking
/// thread pool.
#[derive(Debug, Clone)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: Arc<TokenCodec>,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
    /// Always `bearer`
    pub token_type: &'static str,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    pub fn new(password_hasher: PasswordHasher, token_codec: Arc<TokenCodec>) -> Self {
        Self {
            password_hasher,
            token_codec,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Claims to sign; must carry the principal's subject
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.issue(claims, None)?;

        Ok(AuthenticationResult {
            access_token,
            token_type: BEARER_TOKEN_TYPE,
        })
    }

    /// Whether the stored hash was produced with outdated hashing parameters.
    pub fn needs_rehash(&self, stored_hash: &str) -> bool {
        self.password_hasher.needs_rehash(stored_hash)
    }

    pub fn token_codec(&self) -> &Arc<TokenCodec> {
        &self.token_codec
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::TokenSettings;
    use crate::password::HashScheme;

    fn authenticator() -> Authenticator {
        let hasher = PasswordHasher::with_scheme(HashScheme::Bcrypt, 4).unwrap();
        let codec = TokenCodec::new(&TokenSettings::new("test_secret_key_at_least_32_bytes!"))
            .unwrap();

        Authenticator::new(hasher, Arc::new(codec))
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("pw123")
            .expect("Failed to hash password");

        let result = authenticator
            .authenticate("pw123", &hash, Claims::for_subject("alice@example.com"))
            .expect("Authentication failed");

        assert_eq!(result.token_type, "bearer");

        let decoded = authenticator
            .token_codec()
            .decode(&result.access_token)
            .expect("Token validation failed");
        assert_eq!(decoded.subject(), Some("alice@example.com"));
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator.hash_password("pw123").unwrap();

        let result =
            authenticator.authenticate("wrong_password", &hash, Claims::for_subject("a@b.io"));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_against_malformed_hash() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("pw123", "garbage", Claims::for_subject("a@b.io"));
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_requires_subject() {
        let authenticator = authenticator();
        let hash = authenticator.hash_password("pw123").unwrap();

        let result = authenticator.authenticate("pw123", &hash, Claims::new());
        assert!(matches!(
            result,
            Err(AuthenticationError::TokenError(TokenError::MissingSubject))
        ));
    }
}
