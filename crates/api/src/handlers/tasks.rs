use axum::extract::State;
use axum::Json;
use shepherd_db::models::task::Task;
use shepherd_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/tasks
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = TaskRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: tasks }))
}
