//! Error types for the persistence layer and the HTTP boundary.
//!
//! [`HistoryError`] is what the stores return. [`classify`] and
//! [`HistoryError::kind`] are pure: they only decide which [`ErrorKind`]
//! a failure belongs to, and recording the failure is left to an
//! [`ErrorObserver`](crate::service::ErrorObserver).
//!
//! [`ApiError`] is the only error the handlers return. Its response body
//! is a fixed plain-text message; the underlying detail never reaches
//! the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Coarse category of a persistence failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// No pooled connection became available within the acquire timeout.
    PoolTimeout,
    /// The pool has been closed.
    PoolClosed,
    /// The database could not be reached or the connection broke.
    Connection,
    /// The database rejected the statement.
    Query,
    /// A returned row did not have the expected shape.
    Decode,
}

impl ErrorKind {
    /// Stable lowercase name, used as a structured log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PoolTimeout => "pool_timeout",
            Self::PoolClosed => "pool_closed",
            Self::Connection => "connection",
            Self::Query => "query",
            Self::Decode => "decode",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a history store operation.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Timed out waiting for a pooled connection.
    #[error("timed out waiting for a database connection")]
    PoolTimedOut,

    /// The connection pool is closed.
    #[error("database connection pool is closed")]
    PoolClosed,

    /// Could not talk to the database.
    #[error("database connection error: {0}")]
    Connection(String),

    /// The statement failed on the database side.
    #[error("query failed: {0}")]
    Query(String),

    /// A row could not be decoded.
    #[error("failed to decode row: {0}")]
    Decode(String),
}

impl HistoryError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PoolTimedOut => ErrorKind::PoolTimeout,
            Self::PoolClosed => ErrorKind::PoolClosed,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Query(_) => ErrorKind::Query,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Maps a driver error onto an [`ErrorKind`].
#[must_use]
pub fn classify(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::PoolTimedOut => ErrorKind::PoolTimeout,
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => ErrorKind::PoolClosed,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Protocol(_)
        | sqlx::Error::Configuration(_) => ErrorKind::Connection,
        sqlx::Error::RowNotFound
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_) => ErrorKind::Decode,
        _ => ErrorKind::Query,
    }
}

impl From<sqlx::Error> for HistoryError {
    fn from(err: sqlx::Error) -> Self {
        match classify(&err) {
            ErrorKind::PoolTimeout => Self::PoolTimedOut,
            ErrorKind::PoolClosed => Self::PoolClosed,
            ErrorKind::Connection => Self::Connection(err.to_string()),
            ErrorKind::Query => Self::Query(err.to_string()),
            ErrorKind::Decode => Self::Decode(err.to_string()),
        }
    }
}

/// Error returned by the HTTP handlers.
///
/// | Variant      | Status | Body                         |
/// |--------------|--------|------------------------------|
/// | `SaveFailed` | 500    | `Failed to save to database` |
/// | `ListFailed` | 500    | `Failed to get history`      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Saving a history record failed.
    #[error("Failed to save to database")]
    SaveFailed,

    /// Listing history records failed.
    #[error("Failed to get history")]
    ListFailed,
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::SaveFailed | Self::ListFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
