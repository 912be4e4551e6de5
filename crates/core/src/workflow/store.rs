//! Persistence contract for submissions and edit proposals.

use async_trait::async_trait;

use super::record::{NewRecord, RecordFilter, ReviewRecord, StatusChange};
use crate::types::{BoxError, DbId};

/// A queue of reviewable records (moderation queue or edit proposals).
#[async_trait]
pub trait ReviewStore: Send + Sync {
    type Record: ReviewRecord;

    /// Insert a record and return the stored row.
    async fn create(&self, input: &NewRecord) -> Result<Self::Record, BoxError>;

    async fn get_by_id(&self, id: DbId) -> Result<Option<Self::Record>, BoxError>;

    /// Move a record out of pending.
    ///
    /// Implementations must only update a row whose status is still
    /// `pending` and return `Ok(None)` when no such row exists, so two
    /// concurrent reviews cannot both succeed.
    async fn update_status(&self, change: &StatusChange)
        -> Result<Option<Self::Record>, BoxError>;

    /// All records matching `filter`, newest first.
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<Self::Record>, BoxError>;

    /// All records authored by `actor_id`, newest first.
    async fn list_by_actor(&self, actor_id: DbId) -> Result<Vec<Self::Record>, BoxError>;
}
