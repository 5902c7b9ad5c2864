//! History service: the single entry point the handlers call.

use std::sync::Arc;

use super::observer::{ErrorObserver, Operation, TracingObserver};
use crate::error::HistoryError;
use crate::persistence::{HistoryRecord, HistoryStore};

/// Thin coordinator over a [`HistoryStore`].
///
/// Holds no state of its own beyond the store and the observer, so one
/// instance is shared by every request.
#[derive(Debug, Clone)]
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
    observer: Arc<dyn ErrorObserver>,
}

impl HistoryService {
    /// Creates a new `HistoryService`.
    #[must_use]
    pub fn new(store: Arc<dyn HistoryStore>, observer: Arc<dyn ErrorObserver>) -> Self {
        Self { store, observer }
    }

    /// Creates a service that logs failures with [`TracingObserver`].
    #[must_use]
    pub fn with_tracing(store: Arc<dyn HistoryStore>) -> Self {
        Self::new(store, Arc::new(TracingObserver))
    }

    /// Ensures the backing table exists.
    ///
    /// # Errors
    ///
    /// Returns the store's [`HistoryError`] after recording it.
    pub async fn initialize(&self) -> Result<(), HistoryError> {
        self.store
            .initialize()
            .await
            .inspect_err(|e| self.observer.record(Operation::Initialize, e))
    }

    /// Stores `payload` and returns its new id.
    ///
    /// # Errors
    ///
    /// Returns the store's [`HistoryError`] after recording it.
    pub async fn save(&self, payload: &serde_json::Value) -> Result<i64, HistoryError> {
        let id = self
            .store
            .save(payload)
            .await
            .inspect_err(|e| self.observer.record(Operation::Save, e))?;

        tracing::info!(id, "history saved");
        Ok(id)
    }

    /// Returns every record, newest first.
    ///
    /// # Errors
    ///
    /// Returns the store's [`HistoryError`] after recording it.
    pub async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.store
            .list()
            .await
            .inspect_err(|e| self.observer.record(Operation::List, e))
    }
}
