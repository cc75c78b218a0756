use std::fmt;
use std::str::FromStr;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Longest secret prefix that takes part in hashing.
///
/// bcrypt ignores everything past 72 bytes, so both schemes truncate to keep
/// hashes interchangeable. Two secrets sharing the same 72-byte prefix hash
/// identically.
pub const MAX_PASSWORD_BYTES: usize = 72;

const BCRYPT_MIN_COST: u32 = 4;
const BCRYPT_MAX_COST: u32 = 31;

/// Hashing algorithm used for newly created hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Bcrypt,
    Argon2id,
}

impl HashScheme {
    fn of(hash: &str) -> Option<Self> {
        if hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$") {
            Some(HashScheme::Bcrypt)
        } else if hash.starts_with("$argon2") {
            Some(HashScheme::Argon2id)
        } else {
            None
        }
    }
}

impl FromStr for HashScheme {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bcrypt" => Ok(HashScheme::Bcrypt),
            "argon2" | "argon2id" => Ok(HashScheme::Argon2id),
            other => Err(PasswordError::UnsupportedScheme(other.to_string())),
        }
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashScheme::Bcrypt => f.write_str("bcrypt"),
            HashScheme::Argon2id => f.write_str("argon2id"),
        }
    }
}

/// One-way credential hashing.
///
/// Hashes are salted, so hashing the same secret twice never yields the same
/// string. Verification accepts hashes from either supported scheme.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    scheme: HashScheme,
    cost: u32,
}

impl PasswordHasher {
    /// Create a bcrypt hasher with the library default cost.
    pub fn new() -> Self {
        Self {
            scheme: HashScheme::Bcrypt,
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher for an explicit scheme.
    ///
    /// # Arguments
    /// * `scheme` - Algorithm for new hashes
    /// * `cost` - bcrypt cost factor (ignored by Argon2id)
    ///
    /// # Errors
    /// * `UnsupportedScheme` - bcrypt cost outside the 4..=31 range
    pub fn with_scheme(scheme: HashScheme, cost: u32) -> Result<Self, PasswordError> {
        if scheme == HashScheme::Bcrypt && !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&cost) {
            return Err(PasswordError::UnsupportedScheme(format!(
                "bcrypt cost {} outside {}..={}",
                cost, BCRYPT_MIN_COST, BCRYPT_MAX_COST
            )));
        }

        Ok(Self { scheme, cost })
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Hash a plaintext password.
    ///
    /// # Arguments
    /// * `password` - Plaintext password; only the first 72 bytes are used
    ///
    /// # Returns
    /// Self-describing hash string (modular crypt or PHC format)
    ///
    /// # Errors
    /// * `HashingFailed` - Underlying algorithm failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let secret = truncated(password);

        match self.scheme {
            HashScheme::Bcrypt => bcrypt::hash(secret, self.cost)
                .map_err(|e| PasswordError::HashingFailed(e.to_string())),
            HashScheme::Argon2id => {
                let salt = SaltString::generate(&mut OsRng);

                Argon2::default()
                    .hash_password(secret, &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| PasswordError::HashingFailed(e.to_string()))
            }
        }
    }

    /// Verify a password against a stored hash.
    ///
    /// Fails closed: a malformed or unrecognised hash never matches.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let secret = truncated(password);

        match HashScheme::of(hash) {
            Some(HashScheme::Bcrypt) => bcrypt::verify(secret, hash).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Stored bcrypt hash is malformed");
                false
            }),
            Some(HashScheme::Argon2id) => match PasswordHash::new(hash) {
                Ok(parsed) => Argon2::default().verify_password(secret, &parsed).is_ok(),
                Err(e) => {
                    tracing::warn!(error = %e, "Stored argon2 hash is malformed");
                    false
                }
            },
            None => {
                tracing::warn!("Stored password hash has an unknown format");
                false
            }
        }
    }

    /// Whether a stored hash should be replaced on the next successful login.
    ///
    /// True when the hash was produced by another scheme or, for bcrypt, with
    /// a different cost factor.
    pub fn needs_rehash(&self, hash: &str) -> bool {
        match (HashScheme::of(hash), self.scheme) {
            (Some(HashScheme::Bcrypt), HashScheme::Bcrypt) => {
                bcrypt_cost(hash) != Some(self.cost)
            }
            (Some(HashScheme::Argon2id), HashScheme::Argon2id) => false,
            _ => true,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn truncated(password: &str) -> &[u8] {
    let bytes = password.as_bytes();
    &bytes[..bytes.len().min(MAX_PASSWORD_BYTES)]
}

// "$2b$12$<salt+hash>"
fn bcrypt_cost(hash: &str) -> Option<u32> {
    hash.split('$').nth(2)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::with_scheme(HashScheme::Bcrypt, 4).expect("valid cost")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");

        assert!(hash.starts_with("$2b$04$"));
        assert!(hasher.verify(password, &hash));
        assert!(!hasher.verify("wrong_password", &hash));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("pw123").unwrap();
        let second = hasher.hash("pw123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("pw123", &first));
        assert!(hasher.verify("pw123", &second));
    }

    #[test]
    fn test_secrets_sharing_72_byte_prefix_collide() {
        let hasher = fast_hasher();
        let prefix = "a".repeat(MAX_PASSWORD_BYTES);
        let first = format!("{}first", prefix);
        let second = format!("{}second", prefix);

        let hash = hasher.hash(&first).unwrap();

        assert!(hasher.verify(&first, &hash));
        assert!(hasher.verify(&second, &hash));
        assert!(!hasher.verify(&prefix[1..], &hash));
    }

    #[test]
    fn test_truncation_respects_byte_boundary_inside_multibyte_char() {
        let hasher = fast_hasher();
        // 71 ASCII bytes followed by a 2-byte character straddling the limit.
        let password = format!("{}é", "b".repeat(MAX_PASSWORD_BYTES - 1));

        let hash = hasher.hash(&password).unwrap();

        assert!(hasher.verify(&password, &hash));
    }

    #[test]
    fn test_verify_malformed_hash_fails_closed() {
        let hasher = fast_hasher();

        assert!(!hasher.verify("password", "invalid_hash"));
        assert!(!hasher.verify("password", "$2b$12$tooshort"));
        assert!(!hasher.verify("password", "$argon2id$garbage"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_argon2_scheme_round_trip() {
        let hasher = PasswordHasher::with_scheme(HashScheme::Argon2id, 0).unwrap();

        let hash = hasher.hash("my_password").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("my_password", &hash));
        assert!(!hasher.verify("other", &hash));
    }

    #[test]
    fn test_verify_accepts_hash_from_other_scheme() {
        let argon = PasswordHasher::with_scheme(HashScheme::Argon2id, 0).unwrap();
        let bcrypt = fast_hasher();

        let legacy = argon.hash("pw123").unwrap();

        assert!(bcrypt.verify("pw123", &legacy));
        assert!(bcrypt.needs_rehash(&legacy));
    }

    #[test]
    fn test_needs_rehash_on_cost_change() {
        let cheap = fast_hasher();
        let expensive = PasswordHasher::with_scheme(HashScheme::Bcrypt, 5).unwrap();

        let hash = cheap.hash("pw123").unwrap();

        assert!(!cheap.needs_rehash(&hash));
        assert!(expensive.needs_rehash(&hash));
        assert!(cheap.needs_rehash("not-a-hash"));
    }

    #[test]
    fn test_rejects_out_of_range_cost() {
        assert!(PasswordHasher::with_scheme(HashScheme::Bcrypt, 3).is_err());
        assert!(PasswordHasher::with_scheme(HashScheme::Bcrypt, 32).is_err());
    }

    #[test]
    fn test_scheme_from_str() {
        assert_eq!("bcrypt".parse::<HashScheme>().unwrap(), HashScheme::Bcrypt);
        assert_eq!("Argon2".parse::<HashScheme>().unwrap(), HashScheme::Argon2id);
        assert!("md5".parse::<HashScheme>().is_err());
    }
}
