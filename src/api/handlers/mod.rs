//! REST endpoint handlers.

pub mod history;

use axum::Router;

use crate::app_state::AppState;

/// Composes all JSON endpoint routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(history::routes())
}
