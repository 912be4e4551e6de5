//! Edit proposal model.

use curator_core::types::{DbId, FieldMap, Timestamp};
use curator_core::workflow::{ItemType, Mutation, ReviewRecord, ReviewStatus};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `edit_proposals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EditProposal {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub item_type: ItemType,
    pub item_id: DbId,
    pub proposed_changes: Json<FieldMap>,
    /// Snapshot taken when the proposal was made. Audit only.
    pub current_values: Option<Json<FieldMap>>,
    pub proposed_by: DbId,
    #[sqlx(try_from = "String")]
    pub status: ReviewStatus,
    pub moderator_notes: Option<String>,
    pub reviewed_by: Option<DbId>,
    pub reviewed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ReviewRecord for EditProposal {
    fn id(&self) -> DbId {
        self.id
    }

    fn item_type(&self) -> ItemType {
        self.item_type
    }

    fn item_id(&self) -> DbId {
        self.item_id
    }

    fn status(&self) -> ReviewStatus {
        self.status
    }

    fn author_id(&self) -> DbId {
        self.proposed_by
    }

    fn moderator_notes(&self) -> Option<&str> {
        self.moderator_notes.as_deref()
    }

    fn approval_mutation(&self) -> Mutation<'_> {
        Mutation::Apply(&self.proposed_changes.0)
    }
}
