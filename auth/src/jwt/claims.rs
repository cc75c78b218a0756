use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Access token payload.
///
/// `sub` carries the principal's email. `exp` and `iat` are stamped by the
/// codec at issuance. Any other claim lands in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (principal email)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims identifying a principal by subject.
    pub fn for_subject(subject: impl ToString) -> Self {
        Self::new().with_subject(subject)
    }

    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Add a custom field. Values that fail to serialize are skipped.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Subject claim, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("alice@example.com");
        assert_eq!(claims.subject(), Some("alice@example.com"));
        assert!(claims.exp.is_none());
        assert!(claims.iat.is_none());
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims::for_subject("");
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_extra_claims_are_flattened() {
        let claims = Claims::for_subject("alice@example.com").with_extra("role", "editor");

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], "alice@example.com");
        assert_eq!(json["role"], "editor");
        assert!(json.get("exp").is_none());

        let parsed: Claims = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, claims);
    }
}
