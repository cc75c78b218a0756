use async_trait::async_trait;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentId;
use crate::domain::content::models::CreateContentCommand;
use crate::domain::content::models::Page;
use crate::domain::user::models::UserId;

/// Port for content domain service operations.
#[async_trait]
pub trait ContentServicePort: Send + Sync + 'static {
    /// Publish a content item owned by `owner_id`. Unknown tags are created.
    async fn create_content(
        &self,
        command: CreateContentCommand,
        owner_id: UserId,
    ) -> Result<Content, ContentError>;

    /// Newest first.
    async fn list_content(&self, page: Page) -> Result<Vec<Content>, ContentError>;

    /// # Errors
    /// * `NotFound` - Content does not exist
    async fn get_content(&self, id: ContentId) -> Result<Content, ContentError>;

    /// Delete a content item on behalf of `requester`.
    ///
    /// # Returns
    /// The deleted item
    ///
    /// # Errors
    /// * `NotFound` - Content does not exist
    /// * `Forbidden` - Requester does not own the item
    async fn delete_content(
        &self,
        id: ContentId,
        requester: UserId,
    ) -> Result<Content, ContentError>;

    /// Distinct items carrying at least one tag the user follows, newest first.
    async fn get_feed(&self, user_id: UserId, page: Page) -> Result<Vec<Content>, ContentError>;
}

/// Persistence operations for content aggregate.
#[async_trait]
pub trait ContentRepository: Send + Sync + 'static {
    /// Persist a content item together with its tag links.
    async fn create(&self, content: Content) -> Result<Content, ContentError>;

    async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, ContentError>;

    async fn list(&self, page: Page) -> Result<Vec<Content>, ContentError>;

    /// # Errors
    /// * `NotFound` - Content does not exist
    async fn delete(&self, id: ContentId) -> Result<(), ContentError>;

    async fn find_by_followed_tags(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Content>, ContentError>;
}
