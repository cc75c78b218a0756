use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::content::errors::ContentError;
use crate::domain::content::models::Content;
use crate::domain::content::models::ContentId;
use crate::domain::content::models::ContentTitle;
use crate::domain::content::models::ContentUrl;
use crate::domain::content::models::Page;
use crate::domain::content::ports::ContentRepository;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::models::TagName;
use crate::domain::user::models::UserId;

pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_content(row: &PgRow) -> Result<Content, ContentError> {
        let title: String = row.get("title");
        let url: String = row.get("url");

        Ok(Content {
            id: ContentId(row.get("id")),
            title: ContentTitle::new(&title)?,
            url: ContentUrl::new(&url)?,
            description: row.get("description"),
            owner_id: UserId(row.get("owner_id")),
            created_at: row.get("created_at"),
            tags: Vec::new(),
        })
    }

    /// Attach tag lists to content rows with a single query.
    async fn with_tags(&self, rows: Vec<PgRow>) -> Result<Vec<Content>, ContentError> {
        let mut items = rows
            .iter()
            .map(Self::row_to_content)
            .collect::<Result<Vec<_>, _>>()?;

        if items.is_empty() {
            return Ok(items);
        }

        let ids: Vec<Uuid> = items.iter().map(|c| c.id.0).collect();

        let tag_rows = sqlx::query(
            r#"
            SELECT ct.content_id, t.id, t.name
            FROM content_tags ct
            JOIN tags t ON t.id = ct.tag_id
            WHERE ct.content_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        let mut tags_by_content: HashMap<Uuid, Vec<Tag>> = HashMap::new();
        for row in tag_rows {
            let name: String = row.get("name");
            tags_by_content
                .entry(row.get("content_id"))
                .or_default()
                .push(Tag {
                    id: TagId(row.get("id")),
                    name: TagName::new(&name)?,
                });
        }

        for item in &mut items {
            item.tags = tags_by_content.remove(&item.id.0).unwrap_or_default();
        }

        Ok(items)
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn create(&self, mut content: Content) -> Result<Content, ContentError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        let row = sqlx::query(
            r#"
            INSERT INTO content (id, title, url, description, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING created_at
            "#,
        )
        .bind(content.id.0)
        .bind(content.title.as_str())
        .bind(content.url.as_str())
        .bind(content.description.as_deref())
        .bind(content.owner_id.0)
        .bind(content.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;
        content.created_at = row.get("created_at");

        for tag in &content.tags {
            sqlx::query(
                r#"
                INSERT INTO content_tags (content_id, tag_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#,
            )
            .bind(content.id.0)
            .bind(tag.id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        content.tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(content)
    }

    async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, ContentError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, url, description, owner_id, created_at
            FROM content
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Ok(self.with_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self, page: Page) -> Result<Vec<Content>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, url, description, owner_id, created_at
            FROM content
            ORDER BY created_at DESC, id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(i64::from(page.skip))
        .bind(i64::from(page.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        self.with_tags(rows).await
    }

    async fn delete(&self, id: ContentId) -> Result<(), ContentError> {
        let result = sqlx::query(
            r#"
            DELETE FROM content
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContentError::NotFound(id));
        }

        Ok(())
    }

    async fn find_by_followed_tags(
        &self,
        user_id: UserId,
        page: Page,
    ) -> Result<Vec<Content>, ContentError> {
        let rows = sqlx::query(
            r#"
            SELECT c.id, c.title, c.url, c.description, c.owner_id, c.created_at
            FROM content c
            WHERE EXISTS (
                SELECT 1
                FROM content_tags ct
                JOIN user_followed_tags uft ON uft.tag_id = ct.tag_id
                WHERE ct.content_id = c.id AND uft.user_id = $1
            )
            ORDER BY c.created_at DESC, c.id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(user_id.0)
        .bind(i64::from(page.skip))
        .bind(i64::from(page.limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContentError::DatabaseError(e.to_string()))?;

        self.with_tags(rows).await
    }
}
