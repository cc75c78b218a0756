use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::tag::errors::TagError;
use crate::domain::tag::models::Tag;
use crate::domain::tag::models::TagId;
use crate::domain::tag::models::TagName;
use crate::domain::tag::ports::TagRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_tag(row: PgRow) -> Result<Tag, TagError> {
        let name: String = row.get("name");
        Ok(Tag {
            id: TagId(row.get("id")),
            name: TagName::new(&name)?,
        })
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn create(&self, tag: Tag) -> Result<Tag, TagError> {
        sqlx::query(
            r#"
            INSERT INTO tags (id, name)
            VALUES ($1, $2)
            "#,
        )
        .bind(tag.id.0)
        .bind(tag.name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("tags_name_key") {
                    return TagError::NameAlreadyExists(tag.name.to_string());
                }
            }
            TagError::DatabaseError(e.to_string())
        })?;

        Ok(tag)
    }

    async fn find_by_id(&self, id: TagId) -> Result<Option<Tag>, TagError> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM tags
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_tag).transpose()
    }

    async fn find_by_name(&self, name: &TagName) -> Result<Option<Tag>, TagError> {
        let row = sqlx::query(
            r#"
            SELECT id, name
            FROM tags
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        row.map(Self::row_to_tag).transpose()
    }

    async fn find_or_create(&self, name: &TagName) -> Result<Tag, TagError> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let row = sqlx::query(
            r#"
            INSERT INTO tags (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(TagId::new().0)
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        Self::row_to_tag(row)
    }

    async fn list_all(&self) -> Result<Vec<Tag>, TagError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM tags
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_tag).collect()
    }

    async fn follow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError> {
        sqlx::query(
            r#"
            INSERT INTO user_followed_tags (user_id, tag_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.0)
        .bind(tag_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn unfollow(&self, user_id: UserId, tag_id: TagId) -> Result<(), TagError> {
        sqlx::query(
            r#"
            DELETE FROM user_followed_tags
            WHERE user_id = $1 AND tag_id = $2
            "#,
        )
        .bind(user_id.0)
        .bind(tag_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_followed_by(&self, user_id: UserId) -> Result<Vec<Tag>, TagError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN user_followed_tags uft ON uft.tag_id = t.id
            WHERE uft.user_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| TagError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Self::row_to_tag).collect()
    }
}
