//! Repository for the `comments` table.

use async_trait::async_trait;
use curator_core::types::{BoxError, DbId, FieldMap};
use curator_core::workflow::{EntityMutator, EntitySummary, ItemType};
use sqlx::PgPool;

use crate::error::EntityWriteError;
use crate::models::comment::{
    Comment, CreateComment, UpdateComment, COMMENT_REQUIRED_FIELDS, COMMENT_WRITABLE_FIELDS,
};
use crate::models::decode_validated;
use crate::models::status::{ENTITY_STATUS_APPROVED, ENTITY_STATUS_PENDING};

const COLUMNS: &str = "id, employee_id, establishment_id, author_id, content, rating, status, \
    created_at, updated_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create_pending(
        pool: &PgPool,
        author_id: DbId,
        input: &CreateComment,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (employee_id, establishment_id, author_id, content, rating, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(input.employee_id)
            .bind(input.establishment_id)
            .bind(author_id)
            .bind(&input.content)
            .bind(input.rating)
            .bind(ENTITY_STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Lifecycle status of one row, `None` when it does not exist.
    pub async fn find_status(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT status FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComment,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET
                employee_id = COALESCE($2, employee_id),
                establishment_id = COALESCE($3, establishment_id),
                content = COALESCE($4, content),
                rating = COALESCE($5, rating)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(input.employee_id)
            .bind(input.establishment_id)
            .bind(&input.content)
            .bind(input.rating)
            .fetch_optional(pool)
            .await
    }

    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("UPDATE comments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

/// [`EntityMutator`] for comments.
///
/// Comments only enter through submissions; `apply` exists for completeness
/// of the capability set.
#[derive(Debug, Clone)]
pub struct CommentMutator {
    pool: PgPool,
}

impl CommentMutator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn summary(row: Comment) -> EntitySummary {
        EntitySummary {
            item_type: ItemType::Comment,
            id: row.id,
            status: row.status,
        }
    }

    fn missing(id: DbId) -> EntityWriteError {
        EntityWriteError::Missing {
            entity: "Comment",
            id,
        }
    }
}

#[async_trait]
impl EntityMutator for CommentMutator {
    fn item_type(&self) -> ItemType {
        ItemType::Comment
    }

    fn writable_fields(&self) -> &'static [&'static str] {
        COMMENT_WRITABLE_FIELDS
    }

    fn required_fields(&self) -> &'static [&'static str] {
        COMMENT_REQUIRED_FIELDS
    }

    fn validate_fields(&self, fields: &FieldMap) -> Result<(), BoxError> {
        decode_validated::<UpdateComment>("Comment", fields)?;
        Ok(())
    }

    async fn status_of(&self, item_id: DbId) -> Result<Option<String>, BoxError> {
        Ok(CommentRepo::find_status(&self.pool, item_id).await?)
    }

    async fn apply(&self, item_id: DbId, changes: &FieldMap) -> Result<EntitySummary, BoxError> {
        let input: UpdateComment = decode_validated("Comment", changes)?;
        let row = CommentRepo::update(&self.pool, item_id, &input)
            .await?
            .ok_or_else(|| Self::missing(item_id))?;
        Ok(Self::summary(row))
    }

    async fn activate(&self, item_id: DbId) -> Result<EntitySummary, BoxError> {
        let row = CommentRepo::set_status(&self.pool, item_id, ENTITY_STATUS_APPROVED)
            .await?
            .ok_or_else(|| Self::missing(item_id))?;
        Ok(Self::summary(row))
    }

    async fn create_pending(
        &self,
        author_id: DbId,
        fields: &FieldMap,
    ) -> Result<EntitySummary, BoxError> {
        let input: CreateComment = decode_validated("Comment", fields)?;
        let row = CommentRepo::create_pending(&self.pool, author_id, &input).await?;
        Ok(Self::summary(row))
    }
}
