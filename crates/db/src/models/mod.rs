//! Domain model structs and DTOs.
//!
//! Each entity submodule contains:
//! - A `FromRow` + `Serialize` struct matching the database row
//! - A `Deserialize` create DTO for pending inserts
//! - A `Deserialize` update DTO (all `Option` fields) for partial updates

use curator_core::types::FieldMap;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::EntityWriteError;

pub mod comment;
pub mod edit_proposal;
pub mod employee;
pub mod establishment;
pub mod notification;
pub mod status;
pub mod submission;

/// Decode a field map into a typed DTO.
///
/// DTOs use `deny_unknown_fields`, so a key outside the writable set is
/// rejected here rather than silently dropped.
pub fn decode_fields<T: DeserializeOwned>(fields: &FieldMap) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Object(fields.clone()))
}

/// Decode a field map and run the DTO's `validator` rules on it.
pub fn decode_validated<T>(entity: &'static str, fields: &FieldMap) -> Result<T, EntityWriteError>
where
    T: DeserializeOwned + Validate,
{
    let input: T = decode_fields(fields)
        .map_err(|source| EntityWriteError::InvalidFields { entity, source })?;
    input
        .validate()
        .map_err(|source| EntityWriteError::Constraint { entity, source })?;
    Ok(input)
}
