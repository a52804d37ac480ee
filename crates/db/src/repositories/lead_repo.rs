//! Repository for the `leads` table.

use shepherd_core::types::DbId;
use sqlx::PgPool;

use crate::models::lead::{CreateLead, Lead};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, phone, email, category, location, owner_email, \
                       contact_person, notes, status, call_status, created_at, updated_at";

/// Provides insert and read access to leads.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a new lead, returning the created row.
    ///
    /// If `status` is `None` in the input, defaults to `new`.
    pub async fn create(pool: &PgPool, input: &CreateLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads (name, phone, email, category, location, owner_email,
                                contact_person, notes, status, call_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 'new'), $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.email)
            .bind(&input.category)
            .bind(&input.location)
            .bind(&input.owner_email)
            .bind(&input.contact_person)
            .bind(&input.notes)
            .bind(input.status.map(|s| s.as_str()))
            .bind(input.call_status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads WHERE id = $1");
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List leads newest first. `None` returns every lead.
    ///
    /// Ties on `created_at` (rows inserted in one transaction) fall back to
    /// descending id so the order is stable.
    pub async fn list(pool: &PgPool, limit: Option<i64>) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leads ORDER BY created_at DESC, id DESC LIMIT $1"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await
    }
}
