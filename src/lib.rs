//! # teamavail-history
//!
//! HTTP service that stores opaque JSON "history" documents in
//! PostgreSQL and lists them back, alongside the static frontend and
//! input data it serves.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)      POST /save-history, GET /history
//!     ├── Static assets (api/)      /, /input
//!     │
//!     ├── HistoryService (service/) ── ErrorObserver
//!     │
//!     ├── HistoryStore (persistence/)
//!     │
//!     └── PostgreSQL `history` table
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod persistence;
pub mod service;
