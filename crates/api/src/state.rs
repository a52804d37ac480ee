use std::sync::Arc;

use crate::config::ServerConfig;
use crate::import_guard::ImportGuard;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: shepherd_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publishes session and import events.
    pub event_bus: Arc<shepherd_events::EventBus>,
    /// Busy flag refusing overlapping lead imports.
    pub import_guard: ImportGuard,
}
