//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::HistoryService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// History service for saving and listing records.
    pub history: Arc<HistoryService>,
}

impl AppState {
    /// Wraps a service in shared state.
    #[must_use]
    pub fn new(history: Arc<HistoryService>) -> Self {
        Self { history }
    }
}
