//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- the caller identified by a Bearer access token.

pub mod auth;
