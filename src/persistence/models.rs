//! Database models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored row from the `history` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HistoryRecord {
    /// Auto-increment row ID.
    pub id: i64,
    /// JSONB document exactly as the client posted it.
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    /// Server-side insertion timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<(i64, serde_json::Value, DateTime<Utc>)> for HistoryRecord {
    fn from((id, data, created_at): (i64, serde_json::Value, DateTime<Utc>)) -> Self {
        Self {
            id,
            data,
            created_at,
        }
    }
}
