//! Repository for the `tasks` table.

use sqlx::PgPool;

use crate::models::task::{CreateTask, Task};

const COLUMNS: &str = "id, title, description, priority, status, due_date, assigned_to, \
                       client_id, lead_id, tags, created_at, updated_at";

pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    ///
    /// Priority defaults to `medium` and status to `todo`.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (title, description, priority, status, due_date, assigned_to,
                                client_id, lead_id, tags)
             VALUES ($1, $2, COALESCE($3, 'medium'), COALESCE($4, 'todo'), $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.priority.map(|p| p.as_str()))
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.due_date)
            .bind(&input.assigned_to)
            .bind(input.client_id)
            .bind(input.lead_id)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// List tasks ordered by due date (undated last), then newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks ORDER BY due_date ASC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await
    }
}
