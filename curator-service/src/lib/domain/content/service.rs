use std::sync::Arc;

use async_trait::async_trait;
use chrono::SubsecRound;
use chrono::Utc;

use super::errors::ContentError;
use super::models::Content;
use super::models::ContentId;
use super::models::CreateContentCommand;
use super::models::Page;
use super::ports::ContentRepository;
use super::ports::ContentServicePort;
use crate::domain::tag::ports::TagRepository;
use crate::domain::user::models::UserId;

/// Concrete implementation of ContentServicePort.
///
/// Ownership is enforced here: only the owner of an item may delete it.
pub struct ContentService<CR, TR>
where
    CR: ContentRepository,
    TR: TagRepository,
{
    content_repository: Arc<CR>,
    tag_repository: Arc<TR>,
}

impl<CR, TR> ContentService<CR, TR>
where
    CR: ContentRepository,
    TR: TagRepository,
{
    pub fn new(content_repository: Arc<CR>, tag_repository: Arc<TR>) -> Self {
        Self {
            content_repository,
            tag_repository,
        }
    }
}

#[async_trait]
impl<CR, TR> ContentServicePort for ContentService<CR, TR>
where
    CR: ContentRepository + 'static,
    TR: TagRepository + 'static,
{
    async fn create_content(
        &self,
        command: CreateContentCommand,
        owner_id: UserId,
    ) -> Result<Content, ContentError> {
        let mut tags = Vec::with_capacity(command.tags.len());
        for name in &command.tags {
            tags.push(self.tag_repository.find_or_create(name).await?);
        }

        let content = Content {
            id: ContentId::new(),
            title: command.title,
            url: command.url,
            description: command.description,
            owner_id,
            // Microseconds, as stored
            created_at: Utc::now().trunc_subsecs(6),
            tags,
        };

        let created = self.content_repository.create(content).await?;
        tracing::info!(
            content_id = %created.id,
            owner_id = %owner_id,
            tag_count = created.tags.len(),
            "Content created"
        );

        Ok(created)
    }

    async fn list_content(&self, page: Page) -> Result<Vec<Content>, ContentError> {
        self.content_repository.list(page).await
    }

    async fn get_content(&self, id: ContentId) -> Result<Content, ContentError> {
        self.content_repository
            .find_by_id(id)
            .await?
            .ok_or(ContentError::NotFound(id))
    }

    async fn delete_content(
        &self,
        id: ContentId,
        requester: UserId,
    ) -> Result<Content, ContentError> {
        let content = self.get_content(id).await?;

        if !content.is_owned_by(requester) {
            tracing::warn!(
                content_id = %id,
                requester = %requester,
                reason = "not_owner",
                "Content deletion rejected"
            );
            return Err(ContentError::Forbidden);
        }

        self.content_repository.delete(id).await?;
        tracing::info!(content_id = %id, "Content deleted");

        Ok(content)
    }

    async fn get_feed(&self, user_id: UserId, page: Page) -> Result<Vec<Content>, ContentError> {
        self.content_repository
            .find_by_followed_tags(user_id, page)
            .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Timelike;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::content::models::ContentTitle;
    use crate::domain::content::models::ContentUrl;
    use crate::domain::tag::errors::TagError;
    use crate::domain::tag::models::Tag;
    use crate::domain::tag::models::TagId;
    use crate::domain::tag::models::TagName;

    mock! {
        pub TestContentRepository {}

        #[async_trait]
        impl ContentRepository for TestContentRepository {
            async fn create(&self, content: Content) -> Result<Content, ContentError>;
            async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, ContentError>;
            async fn list(&self, page: Page) -> Result<Vec<Content>, ContentError>;
            async fn delete(&self, id: ContentId) -> Result<(), ContentError>;
            async fn find_by_followed_tags(&self, user_id: UserId, page: Page) -> Result<Vec<Content>, ContentError>;
        }
    }

    mock! {
        pub TestTagRepository {}

        #[async_trait]
        impl TagRepository for TestTagRepository {
            async fn create(&self, tag: Tag) -> Result<Tag, TagError>;
            async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, TagError>;
            async fn find_by_name(&self, name: &TagName) -> Result<Option<Tag>, TagError>;
            async fn find_or_create(&self, name: &TagName) -> Result<Tag, TagError>;
            async fn list_all(&self) -> Result<Vec<Tag>, TagError>;
            async fn follow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError>;
            async fn unfollow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError>;
            async fn find_followed_by(&self, user_id: UserId) -> Result<Vec<Tag>, TagError>;
        }
    }

    fn content_owned_by(owner_id: UserId) -> Content {
        Content {
            id: ContentId::new(),
            title: ContentTitle::new("Ownership in Rust").unwrap(),
            url: ContentUrl::new("https://example.com/ownership").unwrap(),
            description: None,
            owner_id,
            created_at: Utc::now(),
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_content_creates_missing_tags() {
        let mut content_repository = MockTestContentRepository::new();
        let mut tag_repository = MockTestTagRepository::new();

        tag_repository
            .expect_find_or_create()
            .times(2)
            .returning(|name| Ok(Tag::new(name.clone())));

        let owner_id = UserId::new();
        content_repository
            .expect_create()
            .withf(move |content| {
                content.owner_id == owner_id
                    && content.title.as_str() == "Ownership in Rust"
                    && content.tags.len() == 2
            })
            .times(1)
            .returning(|content| Ok(content));

        let service = ContentService::new(Arc::new(content_repository), Arc::new(tag_repository));

        let command = CreateContentCommand::new(
            ContentTitle::new("Ownership in Rust").unwrap(),
            ContentUrl::new("https://example.com/ownership").unwrap(),
            Some("A primer".to_string()),
            vec![TagName::new("Rust").unwrap(), TagName::new("memory").unwrap()],
        );

        let content = service.create_content(command, owner_id).await.unwrap();

        let tag_names: Vec<&str> = content.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tag_names, vec!["rust", "memory"]);
        assert_eq!(content.owner_id, owner_id);
        assert_eq!(content.created_at.nanosecond() % 1_000, 0);
    }

    #[tokio::test]
    async fn test_get_content_not_found() {
        let mut content_repository = MockTestContentRepository::new();
        let tag_repository = MockTestTagRepository::new();

        content_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = ContentService::new(Arc::new(content_repository), Arc::new(tag_repository));

        let result = service.get_content(ContentId::new()).await;
        assert!(matches!(result.unwrap_err(), ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_content_by_owner() {
        let mut content_repository = MockTestContentRepository::new();
        let tag_repository = MockTestTagRepository::new();

        let owner_id = UserId::new();
        let content = content_owned_by(owner_id);
        let content_id = content.id;

        let found = content.clone();
        content_repository
            .expect_find_by_id()
            .with(eq(content_id))
            .times(1)
            .returning(move |_| Ok(Some(found.clone())));
        content_repository
            .expect_delete()
            .with(eq(content_id))
            .times(1)
            .returning(|_| Ok(()));

        let service = ContentService::new(Arc::new(content_repository), Arc::new(tag_repository));

        let deleted = service.delete_content(content_id, owner_id).await.unwrap();
        assert_eq!(deleted, content);
    }

    #[tokio::test]
    async fn test_delete_content_not_owned_is_forbidden() {
        let mut content_repository = MockTestContentRepository::new();
        let tag_repository = MockTestTagRepository::new();

        let content = content_owned_by(UserId::new());
        let content_id = content.id;

        content_repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(content.clone())));
        content_repository.expect_delete().times(0);

        let service = ContentService::new(Arc::new(content_repository), Arc::new(tag_repository));

        let result = service.delete_content(content_id, UserId::new()).await;
        assert!(matches!(result.unwrap_err(), ContentError::Forbidden));
    }

    #[tokio::test]
    async fn test_delete_unknown_content() {
        let mut content_repository = MockTestContentRepository::new();
        let tag_repository = MockTestTagRepository::new();

        content_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        content_repository.expect_delete().times(0);

        let service = ContentService::new(Arc::new(content_repository), Arc::new(tag_repository));

        let result = service.delete_content(ContentId::new(), UserId::new()).await;
        assert!(matches!(result.unwrap_err(), ContentError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_feed_delegates_with_page() {
        let mut content_repository = MockTestContentRepository::new();
        let tag_repository = MockTestTagRepository::new();

        let user_id = UserId::new();
        let page = Page::new(Some(10), Some(20));
        content_repository
            .expect_find_by_followed_tags()
            .with(eq(user_id), eq(page))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = ContentService::new(Arc::new(content_repository), Arc::new(tag_repository));

        let feed = service.get_feed(user_id, page).await.unwrap();
        assert!(feed.is_empty());
    }
}
