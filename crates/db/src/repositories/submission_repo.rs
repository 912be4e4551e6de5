//! Repository for the `moderation_queue` table.

use async_trait::async_trait;
use chrono::Utc;
use curator_core::types::{BoxError, DbId};
use curator_core::workflow::{NewRecord, RecordFilter, ReviewStatus, ReviewStore, StatusChange};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::submission::Submission;

/// Column list for `moderation_queue` queries.
const COLUMNS: &str = "id, item_type, item_id, status, submitted_by, payload, \
    moderator_notes, reviewed_by, reviewed_at, created_at";

/// Provides CRUD operations for the moderation queue.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a queue entry, returning the created row.
    ///
    /// `reviewed_at` is stamped when the entry is created already reviewed.
    pub async fn create(pool: &PgPool, input: &NewRecord) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO moderation_queue
                (item_type, item_id, status, submitted_by, payload, reviewed_by, reviewed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(input.item_type.as_str())
            .bind(input.item_id)
            .bind(input.status.as_str())
            .bind(input.author_id)
            .bind(Json(&input.fields))
            .bind(input.reviewed_by)
            .bind(input.reviewed_by.map(|_| Utc::now()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM moderation_queue WHERE id = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending entry to a terminal status.
    ///
    /// Returns `None` if the entry does not exist or is no longer pending.
    pub async fn update_status_if_pending(
        pool: &PgPool,
        change: &StatusChange,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE moderation_queue SET
                status = $2,
                reviewed_by = $3,
                moderator_notes = $4,
                reviewed_at = NOW()
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(change.id)
            .bind(change.status.as_str())
            .bind(change.reviewer_id)
            .bind(&change.notes)
            .bind(ReviewStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List entries matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &RecordFilter) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM moderation_queue
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR item_type = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.item_type.map(|t| t.as_str()))
            .fetch_all(pool)
            .await
    }

    /// List a user's own entries, newest first.
    pub async fn list_by_submitter(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM moderation_queue
             WHERE submitted_by = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

/// [`ReviewStore`] over the moderation queue.
#[derive(Debug, Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgSubmissionStore {
    type Record = Submission;

    async fn create(&self, input: &NewRecord) -> Result<Submission, BoxError> {
        Ok(SubmissionRepo::create(&self.pool, input).await?)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<Submission>, BoxError> {
        Ok(SubmissionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_status(&self, change: &StatusChange) -> Result<Option<Submission>, BoxError> {
        Ok(SubmissionRepo::update_status_if_pending(&self.pool, change).await?)
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<Submission>, BoxError> {
        Ok(SubmissionRepo::list(&self.pool, filter).await?)
    }

    async fn list_by_actor(&self, actor_id: DbId) -> Result<Vec<Submission>, BoxError> {
        Ok(SubmissionRepo::list_by_submitter(&self.pool, actor_id).await?)
    }
}
