//! Record Store row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts

pub mod client;
pub mod lead;
pub mod session;
pub mod task;
pub mod user;
