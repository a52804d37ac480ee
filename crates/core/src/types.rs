//! Primitive aliases used across the workspace.

/// Record Store primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Timestamps are stored and exchanged in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Number of leads shown in the dashboard's "recent leads" panel.
pub const RECENT_LEADS_LIMIT: i64 = 5;
