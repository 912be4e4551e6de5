pub mod edit_proposals;
pub mod health;
pub mod notifications;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /submissions                        submit (POST), list (GET, moderator)
/// /submissions/mine                   caller's submissions
/// /submissions/{id}/approve           approve (moderator)
/// /submissions/{id}/reject            reject (moderator, notes required)
///
/// /edit-proposals                     propose (POST), list (GET, moderator)
/// /edit-proposals/mine                caller's proposals
/// /edit-proposals/{id}/approve        approve and apply (moderator)
/// /edit-proposals/{id}/reject         reject (moderator, notes required)
///
/// /notifications                      caller's in-app notifications
/// /notifications/{id}/read            mark read (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/submissions", submissions::router())
        .nest("/edit-proposals", edit_proposals::router())
        .nest("/notifications", notifications::router())
}
