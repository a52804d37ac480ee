//! Route definitions for the `/leads` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, MethodRouter};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Routes mounted at `/leads`.
///
/// ```text
/// GET  /                 -> list
/// GET  /{id}             -> get_by_id
/// GET  /import/template  -> template
/// ```
///
/// `POST /import` lives in [`import_route`].
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list))
        .route("/{id}", get(leads::get_by_id))
        .route("/import/template", get(leads::template))
}

/// `POST /leads/import`, body capped at `max_import_bytes`.
pub fn import_route(max_import_bytes: usize) -> MethodRouter<AppState> {
    post(leads::import).layer(DefaultBodyLimit::max(max_import_bytes))
}
