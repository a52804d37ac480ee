use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Token issuing endpoints are public; `/session` and `/logout` need a live
/// session. `DELETE /session` signs out like `POST /logout`.
pub fn router() -> Router<AppState> {
    let issue = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/refresh", post(auth::refresh));

    let current = Router::new()
        .route("/session", get(auth::session).delete(auth::logout))
        .route("/logout", post(auth::logout));

    issue.merge(current)
}
