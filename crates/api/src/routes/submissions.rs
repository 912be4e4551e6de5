use axum::routing::{get, post};
use axum::Router;

use crate::handlers::submissions;
use crate::state::AppState;

/// Routes mounted at `/submissions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(submissions::create_submission).get(submissions::list_submissions),
        )
        .route("/mine", get(submissions::list_my_submissions))
        .route("/{id}/approve", post(submissions::approve_submission))
        .route("/{id}/reject", post(submissions::reject_submission))
}
