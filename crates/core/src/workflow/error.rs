//! Workflow error taxonomy.

use super::item::{ItemType, ReviewStatus};
use crate::types::DbId;

/// Every way a workflow operation can fail.
///
/// Variants split into two groups: those raised before anything was
/// written (`Validation`, `Unauthorized`, `NotFound`, `AlreadyReviewed`,
/// `RoleLookup`, `Fetch`, `UnsupportedEntityType`) and those raised after
/// a write already landed ([`WorkflowError::leaves_partial_state`]).
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No authenticated actor")]
    Unauthorized,

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Record {id} was already reviewed (status {status:?})")]
    AlreadyReviewed {
        id: DbId,
        /// `None` when a concurrent review won and the new status is unknown.
        status: Option<ReviewStatus>,
    },

    #[error("Could not resolve role for user {user_id}")]
    RoleLookup { user_id: DbId },

    #[error("Failed to fetch {entity}")]
    Fetch { entity: &'static str },

    #[error("Failed to create {entity}")]
    Create { entity: &'static str },

    #[error("Failed to apply changes to {item_type} {item_id:?} (record {record_id:?})")]
    ApplyChanges {
        /// Set only when the record was already stored as approved.
        record_id: Option<DbId>,
        item_type: ItemType,
        item_id: Option<DbId>,
    },

    #[error("Failed to update status of record {record_id} ({item_type} {item_id})")]
    StatusUpdate {
        record_id: DbId,
        item_type: ItemType,
        item_id: DbId,
    },

    #[error("No entity mutator registered for {0}")]
    UnsupportedEntityType(ItemType),
}

impl WorkflowError {
    /// Stable machine-readable code, one per kind.
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::Validation(_) => "VALIDATION_ERROR",
            WorkflowError::Unauthorized => "UNAUTHORIZED",
            WorkflowError::NotFound { .. } => "NOT_FOUND",
            WorkflowError::AlreadyReviewed { .. } => "ALREADY_REVIEWED",
            WorkflowError::RoleLookup { .. } => "ROLE_LOOKUP_ERROR",
            WorkflowError::Fetch { .. } => "FETCH_ERROR",
            WorkflowError::Create { .. } => "CREATE_ERROR",
            WorkflowError::ApplyChanges { .. } => "APPLY_CHANGES_ERROR",
            WorkflowError::StatusUpdate { .. } => "STATUS_UPDATE_ERROR",
            WorkflowError::UnsupportedEntityType(_) => "UNSUPPORTED_ENTITY_TYPE",
        }
    }

    /// Message safe to show to API clients. Collaborator failures map to a
    /// fixed sentence per kind.
    pub fn public_message(&self) -> String {
        match self {
            WorkflowError::Validation(msg) => msg.clone(),
            WorkflowError::Unauthorized => "Unauthorized".to_string(),
            WorkflowError::NotFound { entity, id } => format!("{entity} with id {id} not found"),
            WorkflowError::AlreadyReviewed { .. } => {
                "This item has already been reviewed".to_string()
            }
            WorkflowError::RoleLookup { .. } => "Failed to resolve user role".to_string(),
            WorkflowError::Fetch { .. } => "Failed to fetch records".to_string(),
            WorkflowError::Create { .. } => "Failed to create record".to_string(),
            WorkflowError::ApplyChanges { .. } => "Failed to apply changes".to_string(),
            WorkflowError::StatusUpdate { .. } => "Failed to update status".to_string(),
            WorkflowError::UnsupportedEntityType(_) => "Unsupported entity type".to_string(),
        }
    }

    /// True when a write already happened and the stores may disagree.
    pub fn leaves_partial_state(&self) -> bool {
        match self {
            WorkflowError::ApplyChanges { record_id, .. } => record_id.is_some(),
            WorkflowError::StatusUpdate { .. } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_failures_hide_details() {
        let err = WorkflowError::StatusUpdate {
            record_id: 7,
            item_type: ItemType::Employee,
            item_id: 3,
        };
        assert_eq!(err.public_message(), "Failed to update status");
        assert!(err.leaves_partial_state());
    }

    #[test]
    fn already_reviewed_has_fixed_message() {
        let err = WorkflowError::AlreadyReviewed {
            id: 1,
            status: Some(ReviewStatus::Approved),
        };
        assert_eq!(err.public_message(), "This item has already been reviewed");
        assert_eq!(err.code(), "ALREADY_REVIEWED");
        assert!(!err.leaves_partial_state());
    }

    #[test]
    fn apply_failure_without_record_is_clean() {
        let err = WorkflowError::ApplyChanges {
            record_id: None,
            item_type: ItemType::Comment,
            item_id: None,
        };
        assert!(!err.leaves_partial_state());
    }
}
