//! In-process history store.
//!
//! Mirrors the table semantics (sequential ids, insertion timestamps,
//! newest-first listing) without a database. A store can be switched
//! into a failing mode so callers can exercise their error paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::HistoryStore;
use super::models::HistoryRecord;
use crate::error::HistoryError;

/// History store backed by a `Vec` behind a [`tokio::sync::RwLock`].
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    records: RwLock<Vec<HistoryRecord>>,
    failing: AtomicBool,
}

impl MemoryHistoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Returns the number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns `true` if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check(&self) -> Result<(), HistoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(HistoryError::Connection(
                "in-memory store is in failing mode".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn initialize(&self) -> Result<(), HistoryError> {
        self.check()
    }

    async fn save(&self, payload: &serde_json::Value) -> Result<i64, HistoryError> {
        self.check()?;

        let mut records = self.records.write().await;
        let id = i64::try_from(records.len())
            .map_err(|e| HistoryError::Query(e.to_string()))?
            .saturating_add(1);
        records.push(HistoryRecord {
            id,
            data: payload.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        self.check()?;

        let mut records = self.records.read().await.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}
