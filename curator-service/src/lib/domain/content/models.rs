use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::content::errors::ContentIdError;
use crate::domain::content::errors::ContentTitleError;
use crate::domain::content::errors::ContentUrlError;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagName;
use crate::domain::user::models::UserId;

/// Content unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentId(pub Uuid);

impl ContentId {
    /// Generate a new random content ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a content ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ContentIdError> {
        Uuid::parse_str(s)
            .map(ContentId)
            .map_err(|e| ContentIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ContentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Content title value object
///
/// Trimmed, non-empty, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTitle(String);

impl ContentTitle {
    pub const MAX_LENGTH: usize = 200;

    /// # Errors
    /// * `Empty` - Title is blank
    /// * `TooLong` - Title exceeds 200 characters
    pub fn new(title: &str) -> Result<Self, ContentTitleError> {
        let title = title.trim();
        let length = title.chars().count();

        if length == 0 {
            Err(ContentTitleError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(ContentTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(title.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Absolute http(s) URL pointing at the curated resource.
///
/// Stored as submitted once it parses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentUrl(String);

impl ContentUrl {
    /// # Errors
    /// * `Malformed` - Not an absolute URL
    /// * `UnsupportedScheme` - Scheme is neither http nor https
    pub fn new(url: &str) -> Result<Self, ContentUrlError> {
        let url = url.trim();
        let parsed =
            url::Url::parse(url).map_err(|e| ContentUrlError::Malformed(e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(Self(url.to_string())),
            other => Err(ContentUrlError::UnsupportedScheme(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Content aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub id: ContentId,
    pub title: ContentTitle,
    pub url: ContentUrl,
    pub description: Option<String>,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<Tag>,
}

impl Content {
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }
}

/// Command to publish a new content item
#[derive(Debug, Clone)]
pub struct CreateContentCommand {
    pub title: ContentTitle,
    pub url: ContentUrl,
    pub description: Option<String>,
    pub tags: Vec<TagName>,
}

impl CreateContentCommand {
    /// Duplicate tag names are collapsed, first occurrence wins.
    pub fn new(
        title: ContentTitle,
        url: ContentUrl,
        description: Option<String>,
        tags: Vec<TagName>,
    ) -> Self {
        let mut unique: Vec<TagName> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }

        Self {
            title,
            url,
            description,
            tags: unique,
        }
    }
}

/// Offset pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub const MAX_LIMIT: u32 = 100;

    /// Defaults to the first 100 items; larger limits are capped at 100.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(Self::MAX_LIMIT).min(Self::MAX_LIMIT),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_validation() {
        assert_eq!(ContentTitle::new("  Hello ").unwrap().as_str(), "Hello");
        assert_eq!(ContentTitle::new(" "), Err(ContentTitleError::Empty));
        assert!(ContentTitle::new(&"t".repeat(200)).is_ok());
        assert_eq!(
            ContentTitle::new(&"t".repeat(201)),
            Err(ContentTitleError::TooLong {
                max: 200,
                actual: 201
            })
        );
    }

    #[test]
    fn test_url_validation() {
        assert_eq!(
            ContentUrl::new("https://example.com").unwrap().as_str(),
            "https://example.com"
        );
        assert!(ContentUrl::new("http://example.com/a?b=c").is_ok());
        assert!(matches!(
            ContentUrl::new("ftp://example.com"),
            Err(ContentUrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            ContentUrl::new("example.com"),
            Err(ContentUrlError::Malformed(_))
        ));
    }

    #[test]
    fn test_command_collapses_duplicate_tags() {
        let command = CreateContentCommand::new(
            ContentTitle::new("Title").unwrap(),
            ContentUrl::new("https://example.com").unwrap(),
            None,
            vec![
                TagName::new("rust").unwrap(),
                TagName::new("Rust").unwrap(),
                TagName::new("web").unwrap(),
            ],
        );

        let names: Vec<&str> = command.tags.iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["rust", "web"]);
    }

    #[test]
    fn test_page_limits() {
        assert_eq!(Page::default(), Page { skip: 0, limit: 100 });
        assert_eq!(Page::new(Some(5), Some(500)), Page { skip: 5, limit: 100 });
        assert_eq!(Page::new(None, Some(0)).limit, 0);
    }
}
