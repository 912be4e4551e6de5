//! Comment entity model and DTOs.

use curator_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Fields a submission may set on a comment.
pub const COMMENT_WRITABLE_FIELDS: &[&str] = &["content", "rating", "employee_id", "establishment_id"];

/// Fields a new comment cannot be created without.
pub const COMMENT_REQUIRED_FIELDS: &[&str] = &["content"];

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub employee_id: Option<DbId>,
    pub establishment_id: Option<DbId>,
    pub author_id: Option<DbId>,
    pub content: String,
    pub rating: Option<i16>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting a new comment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateComment {
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    pub employee_id: Option<DbId>,
    pub establishment_id: Option<DbId>,
}

/// DTO for a partial comment update. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateComment {
    #[validate(length(min = 1))]
    pub content: Option<String>,
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i16>,
    pub employee_id: Option<DbId>,
    pub establishment_id: Option<DbId>,
}
