//! Repository for the `edit_proposals` table.

use async_trait::async_trait;
use chrono::Utc;
use curator_core::types::{BoxError, DbId};
use curator_core::workflow::{NewRecord, RecordFilter, ReviewStatus, ReviewStore, StatusChange};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::edit_proposal::EditProposal;

/// Column list for `edit_proposals` queries.
const COLUMNS: &str = "id, item_type, item_id, proposed_changes, current_values, proposed_by, \
    status, moderator_notes, reviewed_by, reviewed_at, created_at";

/// Provides CRUD operations for edit proposals.
pub struct EditProposalRepo;

impl EditProposalRepo {
    /// Insert a proposal, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewRecord) -> Result<EditProposal, sqlx::Error> {
        let query = format!(
            "INSERT INTO edit_proposals
                (item_type, item_id, proposed_changes, current_values, proposed_by,
                 status, reviewed_by, reviewed_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EditProposal>(&query)
            .bind(input.item_type.as_str())
            .bind(input.item_id)
            .bind(Json(&input.fields))
            .bind(input.current_values.as_ref().map(Json))
            .bind(input.author_id)
            .bind(input.status.as_str())
            .bind(input.reviewed_by)
            .bind(input.reviewed_by.map(|_| Utc::now()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<EditProposal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM edit_proposals WHERE id = $1");
        sqlx::query_as::<_, EditProposal>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Move a pending proposal to a terminal status.
    ///
    /// Returns `None` if the proposal does not exist or is no longer pending.
    pub async fn update_status_if_pending(
        pool: &PgPool,
        change: &StatusChange,
    ) -> Result<Option<EditProposal>, sqlx::Error> {
        let query = format!(
            "UPDATE edit_proposals SET
                status = $2,
                reviewed_by = $3,
                moderator_notes = $4,
                reviewed_at = NOW()
             WHERE id = $1 AND status = $5
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, EditProposal>(&query)
            .bind(change.id)
            .bind(change.status.as_str())
            .bind(change.reviewer_id)
            .bind(&change.notes)
            .bind(ReviewStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// List proposals matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RecordFilter,
    ) -> Result<Vec<EditProposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM edit_proposals
             WHERE ($1::TEXT IS NULL OR status = $1)
               AND ($2::TEXT IS NULL OR item_type = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EditProposal>(&query)
            .bind(filter.status.map(|s| s.as_str()))
            .bind(filter.item_type.map(|t| t.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_proposer(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<EditProposal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM edit_proposals
             WHERE proposed_by = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, EditProposal>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}

/// [`ReviewStore`] over the edit proposal table.
#[derive(Debug, Clone)]
pub struct PgEditProposalStore {
    pool: PgPool,
}

impl PgEditProposalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewStore for PgEditProposalStore {
    type Record = EditProposal;

    async fn create(&self, input: &NewRecord) -> Result<EditProposal, BoxError> {
        Ok(EditProposalRepo::create(&self.pool, input).await?)
    }

    async fn get_by_id(&self, id: DbId) -> Result<Option<EditProposal>, BoxError> {
        Ok(EditProposalRepo::find_by_id(&self.pool, id).await?)
    }

    async fn update_status(&self, change: &StatusChange) -> Result<Option<EditProposal>, BoxError> {
        Ok(EditProposalRepo::update_status_if_pending(&self.pool, change).await?)
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<EditProposal>, BoxError> {
        Ok(EditProposalRepo::list(&self.pool, filter).await?)
    }

    async fn list_by_actor(&self, actor_id: DbId) -> Result<Vec<EditProposal>, BoxError> {
        Ok(EditProposalRepo::list_by_proposer(&self.pool, actor_id).await?)
    }
}
