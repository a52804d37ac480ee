pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod leads;
pub mod tasks;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                      signup (public)
/// /auth/login                       login (public)
/// /auth/refresh                     refresh (public)
/// /auth/logout                      logout (auth)
/// /auth/session                     current session (auth), DELETE logs out
///
/// /leads                            filtered list (auth)
/// /leads/{id}                       detail (auth)
/// /leads/import                     CSV import, raw body (auth, no timeout)
/// /leads/import/template            CSV template download (auth)
///
/// /dashboard                        summary cards and recent leads (auth)
/// /clients                          list (auth)
/// /tasks                            list (auth)
/// ```
///
/// Everything except the import, which [`untimed_api_routes`] serves.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/leads", leads::router())
        .nest("/dashboard", dashboard::router())
        .nest("/clients", clients::router())
        .nest("/tasks", tasks::router())
}

/// Routes exempt from the request timeout. An import keeps writing rows
/// until the whole file is stored.
pub fn untimed_api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new().route("/leads/import", leads::import_route(config.max_import_bytes))
}
