//! Failures raised by the entity mutators.

use curator_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum EntityWriteError {
    #[error("{entity} with id {id} not found")]
    Missing { entity: &'static str, id: DbId },

    #[error("Invalid {entity} fields: {source}")]
    InvalidFields {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {entity} fields: {source}")]
    Constraint {
        entity: &'static str,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
