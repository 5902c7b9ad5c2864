//! Failure observers.

use crate::error::HistoryError;

/// Store operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Table creation at startup.
    Initialize,
    /// Inserting a record.
    Save,
    /// Listing records.
    List,
}

impl Operation {
    /// Stable lowercase name, used as a structured log field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Initialize => "initialize",
            Self::Save => "save",
            Self::List => "list",
        }
    }
}

/// Receives every store failure seen by the service.
pub trait ErrorObserver: std::fmt::Debug + Send + Sync {
    /// Called once per failed operation, before the error is returned.
    fn record(&self, operation: Operation, error: &HistoryError);
}

/// Observer that logs failures through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ErrorObserver for TracingObserver {
    fn record(&self, operation: Operation, error: &HistoryError) {
        tracing::error!(
            operation = operation.as_str(),
            kind = error.kind().as_str(),
            error = %error,
            "history store operation failed"
        );
    }
}
