//! History handlers: save and list.

use axum::extract::{FromRequest, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::error::ApiError;
use crate::persistence::HistoryRecord;

/// Plain-text body returned after a successful save.
pub const SAVED: &str = "Saved";

/// A request body taken verbatim as JSON.
///
/// Only bodies sent with a JSON content type are parsed. Anything else,
/// and an empty JSON body, is read as `{}` and accepted. A JSON-typed body
/// that does not parse is rejected before the handler runs.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonPayload(pub serde_json::Value);

impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_content = has_json_content_type(req.headers());
        let body = axum::body::Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        if !json_content || is_blank(&body) {
            return Ok(Self(serde_json::Value::Object(serde_json::Map::new())));
        }

        let Json(value) = Json::<serde_json::Value>::from_bytes(&body)
            .map_err(IntoResponse::into_response)?;
        Ok(Self(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim();
    mime.eq_ignore_ascii_case("application/json")
        || (mime.len() > 5 && mime.to_ascii_lowercase().ends_with("+json"))
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

/// `POST /save-history` — Store an arbitrary JSON document.
///
/// # Errors
///
/// Returns [`ApiError::SaveFailed`] if the store rejects the insert.
#[utoipa::path(
    post,
    path = "/save-history",
    tag = "History",
    summary = "Save a history record",
    description = "Stores the request body verbatim as a new history record. Any JSON document is accepted; an empty or non-JSON-typed body is stored as `{}`.",
    request_body(content = Object, description = "Arbitrary JSON document", content_type = "application/json"),
    responses(
        (status = 200, description = "Record stored", body = String, content_type = "text/plain"),
        (status = 500, description = "Database failure", body = String, content_type = "text/plain"),
    )
)]
pub async fn save_history(
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload,
) -> Result<impl IntoResponse, ApiError> {
    state
        .history
        .save(&payload)
        .await
        .map_err(|_| ApiError::SaveFailed)?;

    Ok((StatusCode::OK, SAVED))
}

/// `GET /history` — List every history record, newest first.
///
/// # Errors
///
/// Returns [`ApiError::ListFailed`] if the store query fails.
#[utoipa::path(
    get,
    path = "/history",
    tag = "History",
    summary = "List history records",
    description = "Returns all stored records ordered by `created_at`, newest first. No pagination.",
    responses(
        (status = 200, description = "All history records", body = Vec<HistoryRecord>),
        (status = 500, description = "Database failure", body = String, content_type = "text/plain"),
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let records = state
        .history
        .list()
        .await
        .map_err(|_| ApiError::ListFailed)?;

    Ok(Json(records))
}

/// History routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/save-history", post(save_history))
        .route("/history", get(list_history))
}
