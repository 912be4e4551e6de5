use axum::routing::{get, post};
use axum::Router;

use crate::handlers::edit_proposals;
use crate::state::AppState;

/// Routes mounted at `/edit-proposals`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(edit_proposals::create_edit_proposal).get(edit_proposals::list_edit_proposals),
        )
        .route("/mine", get(edit_proposals::list_my_edit_proposals))
        .route("/{id}/approve", post(edit_proposals::approve_edit_proposal))
        .route("/{id}/reject", post(edit_proposals::reject_edit_proposal))
}
