//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod lead_repo;
pub mod session_repo;
pub mod task_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use lead_repo::LeadRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
