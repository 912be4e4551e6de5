//! Handlers for the moderation queue.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use curator_core::types::DbId;
use curator_core::workflow::{SubmitRequest, WorkflowError};

use super::review::{
    approve_record, list_own_records, list_records, parse_item_type, reject_record, ListQuery,
    ReviewBody,
};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::response::SubmitResponse;
use crate::state::AppState;

/// POST /api/v1/submissions
///
/// Without an `item_id` the entity is created first in pending state from
/// the payload, then queued. Moderators and admins are approved on the spot.
pub async fn create_submission(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    let mut created = None;
    if input.item_id.is_none() {
        let item_type = parse_item_type(input.item_type.as_deref())?;
        let fields = input
            .proposed_changes
            .as_ref()
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                WorkflowError::Validation("proposed_changes must be a non-empty object".to_string())
            })?;
        let entity = state
            .mutators
            .create_pending(item_type, auth.user_id, fields)
            .await?;

        tracing::debug!(
            user_id = auth.user_id,
            item_type = %item_type,
            item_id = entity.id,
            "Created pending entity for submission"
        );
        input.item_id = Some(entity.id);
        created = Some((item_type, entity.id));
    }

    let outcome = match state.submissions.submit(auth.user_id, input).await {
        Ok(outcome) => outcome,
        Err(err) => {
            if let Some((item_type, item_id)) = created {
                tracing::error!(
                    error = %err,
                    user_id = auth.user_id,
                    item_type = %item_type,
                    item_id,
                    "Submission failed after its entity was created; pending entity is orphaned"
                );
            }
            return Err(err.into());
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            record: outcome.record,
            auto_approved: outcome.auto_approved,
        }),
    ))
}

/// GET /api/v1/submissions?status=&item_type=
pub async fn list_submissions(
    RequireModerator(_user): RequireModerator,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    list_records(&state.submissions, query).await
}

/// GET /api/v1/submissions/mine
pub async fn list_my_submissions(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    list_own_records(&state.submissions, &auth).await
}

/// POST /api/v1/submissions/{id}/approve
pub async fn approve_submission(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ReviewBody>,
) -> AppResult<impl IntoResponse> {
    approve_record(&state.submissions, &user, id, body, "Submission approved").await
}

/// POST /api/v1/submissions/{id}/reject
pub async fn reject_submission(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ReviewBody>,
) -> AppResult<impl IntoResponse> {
    reject_record(&state.submissions, &user, id, body, "Submission rejected").await
}
