//! Repository for the `clients` table.

use sqlx::PgPool;

use crate::models::client::{Client, CreateClient};

const COLUMNS: &str =
    "id, name, email, phone, contact_person, address, notes, status, created_at, updated_at";

pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, phone, contact_person, address, notes, status)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'active'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.contact_person)
            .bind(&input.address)
            .bind(&input.notes)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }

    /// List all clients, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(pool)
            .await
    }
}
