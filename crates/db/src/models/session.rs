//! Signed-in sessions.
//!
//! A session is opened by signup, login or refresh and ends on logout or
//! when its refresh token is rotated. Access tokens name the session they
//! were issued for, so ending it invalidates them as well.

use shepherd_core::types::{DbId, Timestamp};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    /// Set once the session is signed out or rotated away.
    pub ended_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserSession {
    /// Not ended and not past its refresh deadline at `now`.
    pub fn is_live_at(&self, now: Timestamp) -> bool {
        self.ended_at.is_none() && self.expires_at > now
    }
}

/// Fields needed to open a session.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
