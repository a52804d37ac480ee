//! Postgres-backed [`LeadSink`] used by the CSV importer.

use async_trait::async_trait;
use shepherd_core::lead_import::{ImportedLead, LeadSink, SinkError};

use crate::models::lead::CreateLead;
use crate::repositories::LeadRepo;
use crate::DbPool;

/// Inserts imported leads through [`LeadRepo::create`], one row per call.
#[derive(Clone)]
pub struct PgLeadSink {
    pool: DbPool,
}

impl PgLeadSink {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadSink for PgLeadSink {
    async fn insert_lead(&self, lead: &ImportedLead) -> Result<(), SinkError> {
        let input = CreateLead::from(lead);
        LeadRepo::create(&self.pool, &input)
            .await
            .map(|_| ())
            .map_err(classify)
    }
}

/// Constraint and data errors are the store refusing this row. Anything
/// else (pool timeout, broken connection) is unexpected.
fn classify(err: sqlx::Error) -> SinkError {
    match err {
        sqlx::Error::Database(db_err) => SinkError::Rejected(db_err.message().to_string()),
        other => SinkError::Unexpected(other.to_string()),
    }
}
