//! Request bodies and helpers shared by the submission and edit-proposal
//! handlers.

use axum::Json;
use curator_core::types::DbId;
use curator_core::workflow::{
    ItemType, RecordFilter, ReviewRecord, ReviewStatus, WorkflowEngine, WorkflowError,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{ListResponse, ReviewResponse};

/// Upper bound on reviewer notes.
pub const MAX_NOTES_LEN: u64 = 2000;

/// Body for approve and reject. Notes are mandatory for reject; the
/// engine enforces that.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ReviewBody {
    #[validate(length(max = MAX_NOTES_LEN))]
    pub notes: Option<String>,
}

/// Raw `?status=&item_type=` query string.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub item_type: Option<String>,
}

impl ListQuery {
    /// Parse into a [`RecordFilter`]. Blank values mean "no filter".
    pub fn into_filter(self) -> Result<RecordFilter, WorkflowError> {
        Ok(RecordFilter {
            status: parse_optional::<ReviewStatus>(self.status)?,
            item_type: parse_optional::<ItemType>(self.item_type)?,
        })
    }
}

fn parse_optional<T>(raw: Option<String>) -> Result<Option<T>, WorkflowError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| WorkflowError::Validation(e.to_string())),
    }
}

/// Parse a required `item_type` value.
pub fn parse_item_type(raw: Option<&str>) -> Result<ItemType, WorkflowError> {
    let raw = raw
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| WorkflowError::Validation("item_type is required".to_string()))?;
    raw.parse()
        .map_err(|e: curator_core::error::ParseEnumError| WorkflowError::Validation(e.to_string()))
}

pub async fn list_records<R>(
    engine: &WorkflowEngine<R>,
    query: ListQuery,
) -> AppResult<Json<ListResponse<R>>>
where
    R: ReviewRecord + Serialize + 'static,
{
    let filter = query.into_filter()?;
    let records = engine.list(&filter).await?;
    Ok(Json(ListResponse { records }))
}

pub async fn list_own_records<R>(
    engine: &WorkflowEngine<R>,
    auth: &AuthUser,
) -> AppResult<Json<ListResponse<R>>>
where
    R: ReviewRecord + Serialize + 'static,
{
    let records = engine.list_mine(auth.user_id).await?;
    Ok(Json(ListResponse { records }))
}

pub async fn approve_record<R>(
    engine: &WorkflowEngine<R>,
    reviewer: &AuthUser,
    record_id: DbId,
    body: ReviewBody,
    message: &str,
) -> AppResult<Json<ReviewResponse<R>>>
where
    R: ReviewRecord + Serialize + 'static,
{
    body.validate()?;
    let record = engine.approve(reviewer.user_id, record_id, body.notes).await?;
    Ok(Json(ReviewResponse {
        success: true,
        message: message.to_string(),
        record,
    }))
}

pub async fn reject_record<R>(
    engine: &WorkflowEngine<R>,
    reviewer: &AuthUser,
    record_id: DbId,
    body: ReviewBody,
    message: &str,
) -> AppResult<Json<ReviewResponse<R>>>
where
    R: ReviewRecord + Serialize + 'static,
{
    body.validate()?;
    let record = engine.reject(reviewer.user_id, record_id, body.notes).await?;
    Ok(Json(ReviewResponse {
        success: true,
        message: message.to_string(),
        record,
    }))
}
