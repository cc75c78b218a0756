use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::ConfigurationError;
use super::errors::TokenError;
use super::settings::TokenSettings;

/// Claims the codec owns; they may not appear among the extra claims.
const RESERVED_CLAIMS: [&str; 3] = ["sub", "exp", "iat"];

/// Signs and verifies access tokens.
///
/// Only the HMAC family (HS256, HS384, HS512) is accepted. Decoding enforces
/// the configured algorithm, a present `exp` claim and zero clock leeway.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Build a codec from signing settings.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or blank
    /// * `UnsupportedAlgorithm` - Algorithm is not one of HS256/HS384/HS512
    /// * `InvalidTtl` - Default lifetime is zero or negative
    pub fn new(settings: &TokenSettings) -> Result<Self, ConfigurationError> {
        if settings.secret.trim().is_empty() {
            return Err(ConfigurationError::MissingSecret);
        }

        let algorithm = match Algorithm::from_str(settings.algorithm.trim()) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => alg,
            _ => {
                return Err(ConfigurationError::UnsupportedAlgorithm(
                    settings.algorithm.clone(),
                ))
            }
        };

        if settings.access_token_ttl <= Duration::zero() {
            return Err(ConfigurationError::InvalidTtl(
                settings.access_token_ttl.num_seconds(),
            ));
        }

        let secret = settings.secret.as_bytes();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            default_ttl: settings.access_token_ttl,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Sign claims into a compact token.
    ///
    /// `iat` is set to now and `exp` to now plus `ttl`, or the configured
    /// default lifetime when `ttl` is `None`. A negative `ttl` yields a token
    /// that is already expired.
    ///
    /// # Errors
    /// * `MissingSubject` - Claims carry no non-empty `sub`
    /// * `ReservedClaim` - Claims already carry `exp`, or the extra claims
    ///   name `sub`, `exp` or `iat`
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, mut claims: Claims, ttl: Option<Duration>) -> Result<String, TokenError> {
        if claims.subject().is_none() {
            return Err(TokenError::MissingSubject);
        }
        if claims.exp.is_some() {
            return Err(TokenError::ReservedClaim("exp"));
        }
        if let Some(name) = RESERVED_CLAIMS
            .into_iter()
            .find(|name| claims.extra.contains_key(*name))
        {
            return Err(TokenError::ReservedClaim(name));
        }

        let now = Utc::now();
        let expires_at = now + ttl.unwrap_or(self.default_ttl);
        claims.iat = Some(now.timestamp());
        claims.exp = Some(expires_at.timestamp());

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// Every failure (bad signature, wrong algorithm, expired, malformed,
    /// missing `exp`) is reported as `TokenError::Invalid`. The concrete
    /// reason is logged at debug level only.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::ExpiredSignature => "expired",
                    ErrorKind::InvalidSignature => "bad_signature",
                    ErrorKind::InvalidAlgorithm => "algorithm_mismatch",
                    ErrorKind::MissingRequiredClaim(_) => "missing_claim",
                    _ => "malformed",
                };
                tracing::debug!(reason, "Token rejected");
                TokenError::Invalid
            })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}
