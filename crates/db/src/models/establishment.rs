//! Establishment entity model and DTOs.

use curator_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Fields a submission or edit proposal may set on an establishment.
pub const ESTABLISHMENT_WRITABLE_FIELDS: &[&str] =
    &["name", "address", "city", "description", "website", "phone"];

/// Fields a new establishment cannot be created without.
pub const ESTABLISHMENT_REQUIRED_FIELDS: &[&str] = &["name"];

/// A row from the `establishments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Establishment {
    pub id: DbId,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new establishment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateEstablishment {
    #[validate(length(min = 1))]
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}

/// DTO for a partial establishment update. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateEstablishment {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
}
