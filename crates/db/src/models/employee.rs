//! Employee entity model and DTOs.

use curator_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Fields a submission or edit proposal may set on an employee.
pub const EMPLOYEE_WRITABLE_FIELDS: &[&str] = &["name", "position", "bio", "establishment_id"];

/// Fields a new employee cannot be created without.
pub const EMPLOYEE_REQUIRED_FIELDS: &[&str] = &["name"];

/// A row from the `employees` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub establishment_id: Option<DbId>,
    pub name: String,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new employee.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateEmployee {
    #[validate(length(min = 1))]
    pub name: String,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub establishment_id: Option<DbId>,
}

/// DTO for a partial employee update. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateEmployee {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub position: Option<String>,
    pub bio: Option<String>,
    pub establishment_id: Option<DbId>,
}
