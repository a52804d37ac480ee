//! Task entity model and DTOs.

use serde::{Deserialize, Serialize};
use shepherd_core::status::{TaskPriority, TaskStatus};
use shepherd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A task row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<Timestamp>,
    pub assigned_to: Option<String>,
    pub client_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    /// Defaults to `medium` if omitted.
    pub priority: Option<TaskPriority>,
    /// Defaults to `todo` if omitted.
    pub status: Option<TaskStatus>,
    pub due_date: Option<Timestamp>,
    pub assigned_to: Option<String>,
    pub client_id: Option<DbId>,
    pub lead_id: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
}
