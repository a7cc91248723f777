//! Application state for the web layer.

use std::sync::Arc;

use crate::mbta::MbtaClient;

/// Shared application state.
///
/// Holds only immutable handles; nothing is shared between requests
/// beyond the upstream client's connection pool.
#[derive(Debug, Clone)]
pub struct AppState {
    /// MBTA API client
    pub mbta: Arc<MbtaClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(mbta: MbtaClient) -> Self {
        Self {
            mbta: Arc::new(mbta),
        }
    }
}
