//! Shepherd CRM in-process event bus.
//!
//! - [`EventBus`]: publish/subscribe hub backed by `tokio::sync::broadcast`.
//! - [`CrmEvent`]: the domain event envelope.
//! - [`ActivityLog`]: background subscriber writing every event to the
//!   structured log.

pub mod activity_log;
pub mod bus;

pub use activity_log::ActivityLog;
pub use bus::{CrmEvent, EventBus};

/// Event type names published by the API.
pub mod event_types {
    pub const SIGNED_UP: &str = "session.signed_up";
    pub const SIGNED_IN: &str = "session.signed_in";
    pub const SIGNED_OUT: &str = "session.signed_out";
    pub const LEADS_IMPORTED: &str = "leads.imported";
}
