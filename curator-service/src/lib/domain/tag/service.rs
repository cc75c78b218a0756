use std::sync::Arc;

use async_trait::async_trait;

use super::errors::TagError;
use super::models::Tag;
use super::models::TagId;
use super::models::TagName;
use super::ports::TagRepository;
use super::ports::TagServicePort;
use crate::domain::user::models::UserId;

/// Concrete implementation of TagServicePort.
pub struct TagService<TR>
where
    TR: TagRepository,
{
    tag_repository: Arc<TR>,
}

impl<TR> TagService<TR>
where
    TR: TagRepository,
{
    pub fn new(tag_repository: Arc<TR>) -> Self {
        Self { tag_repository }
    }

    async fn existing_tag(&self, tag_id: TagId) -> Result<Tag, TagError> {
        self.tag_repository
            .find_by_id(tag_id)
            .await?
            .ok_or(TagError::NotFound(tag_id))
    }
}

#[async_trait]
impl<TR> TagServicePort for TagService<TR>
where
    TR: TagRepository + 'static,
{
    async fn create_tag(&self, name: TagName) -> Result<Tag, TagError> {
        if self.tag_repository.find_by_name(&name).await?.is_some() {
            return Err(TagError::NameAlreadyExists(name.to_string()));
        }

        let tag = self.tag_repository.create(Tag::new(name)).await?;
        tracing::info!(tag_id = %tag.id, name = %tag.name, "Tag created");

        Ok(tag)
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, TagError> {
        self.tag_repository.list_all().await
    }

    async fn follow_tag(&self, user_id: UserId, tag_id: TagId) -> Result<Vec<Tag>, TagError> {
        let tag = self.existing_tag(tag_id).await?;

        self.tag_repository.follow(user_id, tag.id).await?;
        tracing::debug!(user_id = %user_id, tag_id = %tag.id, "Tag followed");

        self.tag_repository.find_followed_by(user_id).await
    }

    async fn unfollow_tag(&self, user_id: UserId, tag_id: TagId) -> Result<Vec<Tag>, TagError> {
        let tag = self.existing_tag(tag_id).await?;

        self.tag_repository.unfollow(user_id, tag.id).await?;
        tracing::debug!(user_id = %user_id, tag_id = %tag.id, "Tag unfollowed");

        self.tag_repository.find_followed_by(user_id).await
    }

    async fn followed_tags(&self, user_id: UserId) -> Result<Vec<Tag>, TagError> {
        self.tag_repository.find_followed_by(user_id).await
    }
}
