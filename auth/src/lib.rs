//! Authentication core shared by the curator services
//!
//! - Password hashing (bcrypt or Argon2id, 72-byte input ceiling)
//! - Access token issuance and verification (HMAC-signed JWT)
//! - Per-request identity resolution from a bearer token
//! - An access gate exposing "current identity" to endpoints
//!
//! Services plug their persistence in through [`PrincipalLookup`] and keep
//! resource-specific authorization rules to themselves.
//!
//! # Examples
//!
//! ## Issuing and verifying tokens
//! ```
//! use auth::{Claims, TokenCodec, TokenSettings};
//!
//! let codec = TokenCodec::new(&TokenSettings::new("secret_key_at_least_32_bytes_long!")).unwrap();
//! let token = codec.issue(Claims::for_subject("alice@example.com"), None).unwrap();
//! let claims = codec.decode(&token).unwrap();
//! assert_eq!(claims.subject(), Some("alice@example.com"));
//! ```
//!
//! ## Login flow
//! ```
//! use std::sync::Arc;
//! use auth::{Authenticator, Claims, HashScheme, PasswordHasher, TokenCodec, TokenSettings};
//!
//! let codec = TokenCodec::new(&TokenSettings::new("secret_key_at_least_32_bytes_long!")).unwrap();
//! let hasher = PasswordHasher::with_scheme(HashScheme::Bcrypt, 4).unwrap();
//! let auth = Authenticator::new(hasher, Arc::new(codec));
//!
//! // Register: hash password
//! let hash = auth.hash_password("pw123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth
//!     .authenticate("pw123", &hash, Claims::for_subject("alice@example.com"))
//!     .unwrap();
//! assert_eq!(result.token_type, "bearer");
//! ```

pub mod authenticator;
pub mod gate;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use gate::AccessGate;
pub use gate::AccountStatus;
pub use identity::bearer_token;
pub use identity::IdentityError;
pub use identity::IdentityResolver;
pub use identity::PrincipalLookup;
pub use jwt::Claims;
pub use jwt::ConfigurationError;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenSettings;
pub use password::HashScheme;
pub use password::PasswordError;
pub use password::PasswordHasher;
