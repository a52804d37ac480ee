//! Shepherd CRM domain logic.
//!
//! Pure code with no database or HTTP dependencies:
//!
//! - [`lead_import`] -- CSV lead import pipeline and its [`lead_import::LeadSink`] seam.
//! - [`lead_filter`] -- order-preserving lead search and status filtering.
//! - [`dashboard`] -- per-bucket lead counts.
//! - [`status`] -- text-backed status enums persisted by the Record Store.
//! - [`locale`] -- user-facing strings.

pub mod dashboard;
pub mod error;
pub mod lead_filter;
pub mod lead_import;
pub mod locale;
pub mod status;
pub mod types;
