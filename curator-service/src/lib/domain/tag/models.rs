use std::fmt;

use uuid::Uuid;

use crate::domain::tag::errors::TagIdError;
use crate::domain::tag::errors::TagNameError;

/// Tag unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(pub Uuid);

impl TagId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a tag ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TagIdError> {
        Uuid::parse_str(s)
            .map(TagId)
            .map_err(|e| TagIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TagId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Normalised tag name.
///
/// Surrounding whitespace is trimmed and the name is lowercased, so `Rust`
/// and ` rust ` name the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    pub const MAX_LENGTH: usize = 50;

    /// Create a normalised tag name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty after trimming
    /// * `TooLong` - Name exceeds 50 characters
    pub fn new(name: &str) -> Result<Self, TagNameError> {
        let name = name.trim().to_lowercase();
        let length = name.chars().count();

        if length == 0 {
            return Err(TagNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(TagNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Tag entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: TagId,
    pub name: TagName,
}

impl Tag {
    pub fn new(name: TagName) -> Self {
        Self {
            id: TagId::new(),
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_is_normalised() {
        let name = TagName::new("  Rust ").unwrap();
        assert_eq!(name.as_str(), "rust");
        assert_eq!(name, TagName::new("RUST").unwrap());
    }

    #[test]
    fn test_tag_name_rejects_blank() {
        assert_eq!(TagName::new("   "), Err(TagNameError::Empty));
    }

    #[test]
    fn test_tag_name_rejects_too_long() {
        let result = TagName::new(&"x".repeat(51));
        assert_eq!(result, Err(TagNameError::TooLong { max: 50, actual: 51 }));
        assert!(TagName::new(&"x".repeat(50)).is_ok());
    }
}
