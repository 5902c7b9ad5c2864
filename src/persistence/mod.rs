//! Persistence layer: the `history` table and the stores that front it.
//!
//! [`HistoryStore`] is the seam between the service and the database.
//! [`PostgresHistoryStore`] is the production implementation over a
//! `sqlx::PgPool`; [`MemoryHistoryStore`] keeps records in process and is
//! used to run the HTTP layer without a database.

pub mod memory;
pub mod models;
pub mod pool;
pub mod postgres;

use async_trait::async_trait;

pub use memory::MemoryHistoryStore;
pub use models::HistoryRecord;
pub use postgres::PostgresHistoryStore;

use crate::error::HistoryError;

/// Append-only storage for history records.
#[async_trait]
pub trait HistoryStore: std::fmt::Debug + Send + Sync {
    /// Ensures the backing table exists. Safe to call more than once.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] if the table cannot be created.
    async fn initialize(&self) -> Result<(), HistoryError>;

    /// Stores `payload` and returns the id assigned to it.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] on database failure; nothing is stored
    /// in that case.
    async fn save(&self, payload: &serde_json::Value) -> Result<i64, HistoryError>;

    /// Returns every stored record, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`HistoryError`] on database failure.
    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError>;
}
