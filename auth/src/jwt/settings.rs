use std::fmt;

use chrono::Duration;

/// Default signing algorithm.
pub const DEFAULT_ALGORITHM: &str = "HS256";

/// Default access token lifetime in minutes.
pub const DEFAULT_ACCESS_TOKEN_TTL_MINUTES: i64 = 30;

/// Read-only signing configuration injected into the token codec.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub algorithm: String,
    pub access_token_ttl: Duration,
}

impl TokenSettings {
    /// Settings with the default algorithm and lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: DEFAULT_ALGORITHM.to_string(),
            access_token_ttl: Duration::minutes(DEFAULT_ACCESS_TOKEN_TTL_MINUTES),
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = TokenSettings::new("secret");
        assert_eq!(settings.algorithm, "HS256");
        assert_eq!(settings.access_token_ttl, Duration::minutes(30));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = TokenSettings::new("super-secret-value");
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("super-secret-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
