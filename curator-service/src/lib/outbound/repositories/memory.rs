use std::collections::HashMap;
use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentId;
use crate::domain::content::models::Page;
use crate::domain::content::ports::ContentRepository;
use crate::domain::tag::errors::TagError;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::models::TagName;
use crate::domain::tag::ports::TagRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

#[derive(Default)]
struct State {
    users: HashMap<UserId, User>,
    tags: HashMap<TagId, Tag>,
    /// Insertion order
    content: Vec<Content>,
    follows: HashSet<(UserId, TagId)>,
}

/// Process-local store backing all three repository ports.
///
/// Enforces the same uniqueness rules as the Postgres schema. Data is lost
/// when the process exits.
#[derive(Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_name(tags: &mut [Tag]) {
    tags.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Newest first; items created in the same instant keep reverse insertion order.
fn newest_first<'a>(items: impl DoubleEndedIterator<Item = &'a Content>, page: Page) -> Vec<Content> {
    let mut items: Vec<Content> = items.rev().cloned().collect();
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    items
        .into_iter()
        .skip(page.skip as usize)
        .take(page.limit as usize)
        .collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut state = self.state.write().await;

        if state.users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyRegistered(user.email.to_string()));
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }
}

#[async_trait]
impl TagRepository for InMemoryStore {
    async fn create(&self, tag: Tag) -> Result<Tag, TagError> {
        let mut state = self.state.write().await;

        if state.tags.values().any(|t| t.name == tag.name) {
            return Err(TagError::NameAlreadyExists(tag.name.to_string()));
        }

        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, TagError> {
        Ok(self.state.read().await.tags.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &TagName) -> Result<Option<Tag>, TagError> {
        let state = self.state.read().await;
        Ok(state.tags.values().find(|t| &t.name == name).cloned())
    }

    async fn find_or_create(&self, name: &TagName) -> Result<Tag, TagError> {
        let mut state = self.state.write().await;

        if let Some(existing) = state.tags.values().find(|t| &t.name == name) {
            return Ok(existing.clone());
        }

        let tag = Tag::new(name.clone());
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn list_all(&self) -> Result<Vec<Tag>, TagError> {
        let mut tags: Vec<Tag> = self.state.read().await.tags.values().cloned().collect();
        by_name(&mut tags);
        Ok(tags)
    }

    async fn follow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError> {
        self.state.write().await.follows.insert((user_id, tag_id));
        Ok(())
    }

    async fn unfollow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError> {
        self.state.write().await.follows.remove(&(user_id, tag_id));
        Ok(())
    }

    async fn find_followed_by(&self, user_id: UserId) -> Result<Vec<Tag>, TagError> {
        let state = self.state.read().await;
        let mut tags: Vec<Tag> = state
            .follows
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .filter_map(|(_, tag_id)| state.tags.get(tag_id).cloned())
            .collect();

        by_name(&mut tags);
        Ok(tags)
    }
}

#[async_trait]
impl ContentRepository for InMemoryStore {
    async fn create(&self, mut content: Content) -> Result<Content, ContentError> {
        by_name(&mut content.tags);
        self.state.write().await.content.push(content.clone());
        Ok(content)
    }

    async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, ContentError> {
        let state = self.state.read().await;
        Ok(state.content.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<Content>, ContentError> {
        let state = self.state.read().await;
        Ok(newest_first(state.content.iter(), page))
    }

    async fn delete(&self, id: ContentId) -> Result<(), ContentError> {
        let mut state = self.state.write().await;

        let position = state
            .content
            .iter()
            .position(|c| c.id == id)
            .ok_or(ContentError::NotFound(id))?;

        state.content.remove(position);
        Ok(())
    }

    async fn find_by_followed_tags(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Content>, ContentError> {
        let state = self.state.read().await;
        let followed: HashSet<TagId> = state
            .follows
            .iter()
            .filter(|(follower, _)| *follower == user_id)
            .map(|(_, tag_id)| *tag_id)
            .collect();

        let matching = state
            .content
            .iter()
            .filter(|c| c.tags.iter().any(|t| followed.contains(&t.id)));

        Ok(newest_first(matching, page))
    }
}
