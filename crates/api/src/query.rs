//! Query parameter types for API handlers.

use serde::Deserialize;

/// `GET /leads?q=&filter=`.
///
/// `filter` is kept as a raw string so an unknown tag can be reported as a
/// validation error rather than a generic deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    #[serde(default)]
    pub q: String,
    pub filter: Option<String>,
}
