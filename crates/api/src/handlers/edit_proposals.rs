//! Handlers for crowd-sourced edit proposals.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use curator_core::types::DbId;
use curator_core::workflow::SubmitRequest;

use super::review::{
    approve_record, list_own_records, list_records, reject_record, ListQuery, ReviewBody,
};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::response::SubmitResponse;
use crate::state::AppState;

/// POST /api/v1/edit-proposals
pub async fn create_edit_proposal(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = state.edit_proposals.submit(auth.user_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            record: outcome.record,
            auto_approved: outcome.auto_approved,
        }),
    ))
}

/// GET /api/v1/edit-proposals?status=&item_type=
pub async fn list_edit_proposals(
    RequireModerator(_user): RequireModerator,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<impl IntoResponse> {
    list_records(&state.edit_proposals, query).await
}

/// GET /api/v1/edit-proposals/mine
pub async fn list_my_edit_proposals(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    list_own_records(&state.edit_proposals, &auth).await
}

/// POST /api/v1/edit-proposals/{id}/approve
pub async fn approve_edit_proposal(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ReviewBody>,
) -> AppResult<impl IntoResponse> {
    approve_record(
        &state.edit_proposals,
        &user,
        id,
        body,
        "Edit proposal approved and changes applied",
    )
    .await
}

/// POST /api/v1/edit-proposals/{id}/reject
pub async fn reject_edit_proposal(
    RequireModerator(user): RequireModerator,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<ReviewBody>,
) -> AppResult<impl IntoResponse> {
    reject_record(&state.edit_proposals, &user, id, body, "Edit proposal rejected").await
}
