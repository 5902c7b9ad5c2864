//! PostgreSQL implementation of the history store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::HistoryStore;
use super::models::HistoryRecord;
use crate::error::HistoryError;

const CREATE_HISTORY_TABLE: &str = "CREATE TABLE IF NOT EXISTS history (\
     id BIGSERIAL PRIMARY KEY, \
     data JSONB NOT NULL, \
     created_at TIMESTAMPTZ NOT NULL DEFAULT now()\
     )";

const INSERT_HISTORY: &str = "INSERT INTO history (data) VALUES ($1) RETURNING id";

const SELECT_HISTORY: &str =
    "SELECT id, data, created_at FROM history ORDER BY created_at DESC, id DESC";

/// PostgreSQL-backed history store using `sqlx::PgPool`.
///
/// The pool is handed in by the caller, so several independent stores
/// can coexist in one process. Every operation checks a connection out
/// for a single statement; the connection goes back to the pool when the
/// guard drops, whether the statement succeeded or not.
#[derive(Debug, Clone)]
pub struct PostgresHistoryStore {
    pool: PgPool,
}

impl PostgresHistoryStore {
    /// Creates a new store over the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool, waiting for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl HistoryStore for PostgresHistoryStore {
    async fn initialize(&self) -> Result<(), HistoryError> {
        let mut conn = self.pool.acquire().await?;
        sqlx::query(CREATE_HISTORY_TABLE).execute(&mut *conn).await?;

        tracing::info!("history table initialized");
        Ok(())
    }

    async fn save(&self, payload: &serde_json::Value) -> Result<i64, HistoryError> {
        let mut conn = self.pool.acquire().await?;
        let id = sqlx::query_scalar::<_, i64>(INSERT_HISTORY)
            .bind(payload)
            .fetch_one(&mut *conn)
            .await?;

        Ok(id)
    }

    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryError> {
        let mut conn = self.pool.acquire().await?;
        let rows = sqlx::query_as::<_, (i64, serde_json::Value, DateTime<Utc>)>(SELECT_HISTORY)
            .fetch_all(&mut *conn)
            .await?;

        Ok(rows.into_iter().map(HistoryRecord::from).collect())
    }
}
