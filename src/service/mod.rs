//! Service layer: forwards requests to the store and reports failures.
//!
//! [`HistoryService`] owns a [`crate::persistence::HistoryStore`] and an
//! [`ErrorObserver`]. Store errors are recorded through the observer and
//! then returned unchanged to the caller.

pub mod history_service;
pub mod observer;

pub use history_service::HistoryService;
pub use observer::{ErrorObserver, Operation, TracingObserver};
