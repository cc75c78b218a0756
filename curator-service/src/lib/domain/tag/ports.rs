use async_trait::async_trait;

use crate::domain::tag::errors::TagError;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::models::TagName;
use crate::domain::user::models::UserId;

/// Port for tag domain service operations.
#[async_trait]
pub trait TagServicePort: Send + Sync + 'static {
    /// Create a new tag.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - A tag with the normalised name exists
    /// * `DatabaseError` - Database operation failed
    async fn create_tag(&self, name: TagName) -> Result<Tag, TagError>;

    /// All tags ordered by name.
    async fn list_tags(&self) -> Result<Vec<Tag>, TagError>;

    /// Follow a tag. Following an already followed tag is a no-op.
    ///
    /// # Returns
    /// The tags the user follows afterwards, ordered by name
    ///
    /// # Errors
    /// * `NotFound` - Tag does not exist
    async fn follow_tag(&self, user_id: UserId, tag_id: TagId) -> Result<Vec<Tag>, TagError>;

    /// Stop following a tag. Unfollowing a tag that is not followed is a no-op.
    ///
    /// # Returns
    /// The tags the user follows afterwards, ordered by name
    ///
    /// # Errors
    /// * `NotFound` - Tag does not exist
    async fn unfollow_tag(&self, user_id: UserId, tag_id: TagId) -> Result<Vec<Tag>, TagError>;

    /// Tags followed by a user, ordered by name.
    async fn followed_tags(&self, user_id: UserId) -> Result<Vec<Tag>, TagError>;
}

/// Persistence operations for tags and tag subscriptions.
#[async_trait]
pub trait TagRepository: Send + Sync + 'static {
    /// Persist a new tag.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Name uniqueness violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, tag: Tag) -> Result<Tag, TagError>;

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, TagError>;

    async fn find_by_name(&self, name: &TagName) -> Result<Option<Tag>, TagError>;

    /// Return the tag with this name, creating it first if needed.
    async fn find_or_create(&self, name: &TagName) -> Result<Tag, TagError>;

    async fn list_all(&self) -> Result<Vec<Tag>, TagError>;

    /// Record a subscription. Idempotent.
    async fn follow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError>;

    /// Remove a subscription. Idempotent.
    async fn unfollow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError>;

    async fn find_followed_by(&self, user_id: UserId) -> Result<Vec<Tag>, TagError>;
}
