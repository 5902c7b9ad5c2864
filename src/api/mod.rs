//! HTTP layer: JSON endpoints, static assets, and router composition.
//!
//! ```text
//! POST /save-history   store a JSON document
//! GET  /history        list documents, newest first
//! GET  /input/*        files from the input directory
//! GET  /*              files from the public directory
//! ```

pub mod handlers;
pub mod static_files;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::config::AssetConfig;
use crate::persistence::HistoryRecord;

/// OpenAPI document for the JSON endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    paths(handlers::history::save_history, handlers::history::list_history),
    components(schemas(HistoryRecord)),
    tags((name = "History", description = "Append-only JSON history records"))
)]
pub struct ApiDoc;

/// Builds the router with all JSON endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    router
}

/// Builds the complete application: endpoints, static assets, and
/// middleware, bound to `state`.
pub fn app(state: AppState, assets: &AssetConfig) -> Router {
    static_files::mount(build_router(), assets)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::persistence::{HistoryStore, MemoryHistoryStore};
    use crate::service::HistoryService;

    fn make_app() -> (Router, Arc<MemoryHistoryStore>) {
        let store = Arc::new(MemoryHistoryStore::new());
        let service = HistoryService::with_tracing(Arc::clone(&store) as Arc<dyn HistoryStore>);
        let state = AppState::new(Arc::new(service));
        (app(state, &AssetConfig::default()), store)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        let Ok(req) = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("valid request");
        };
        req
    }

    fn get(uri: &str) -> Request<Body> {
        let Ok(req) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        req
    }

    async fn body_text(response: Response) -> String {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        String::from_utf8_lossy(&bytes).into_owned()
    }

    #[tokio::test]
    async fn save_then_list() {
        let (app, _) = make_app();

        let Ok(res) = app
            .clone()
            .oneshot(post_json("/save-history", r#"{"test":"data"}"#))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Saved");

        let Ok(res) = app.oneshot(get("/history")).await;
        assert_eq!(res.status(), StatusCode::OK);
        let Ok(records) = serde_json::from_str::<Vec<Value>>(&body_text(res).await) else {
            panic!("history is a JSON array");
        };
        assert_eq!(records.len(), 1);
        let Some(first) = records.first() else {
            panic!("one record");
        };
        assert_eq!(first.get("data"), Some(&json!({"test": "data"})));
        assert!(first.get("id").and_then(Value::as_i64).is_some_and(|id| id > 0));
        assert!(first.get("created_at").and_then(Value::as_str).is_some());
    }

    #[tokio::test]
    async fn empty_history_is_empty_array() {
        let (app, _) = make_app();
        let Ok(res) = app.oneshot(get("/history")).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "[]");
    }

    #[tokio::test]
    async fn save_failure_returns_fixed_500_and_stores_nothing() {
        let (app, store) = make_app();
        store.set_failing(true);

        let Ok(res) = app
            .oneshot(post_json("/save-history", r#"{"test":"data"}"#))
            .await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(res).await, "Failed to save to database");

        store.set_failing(false);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn list_failure_returns_fixed_500() {
        let (app, store) = make_app();
        store.set_failing(true);

        let Ok(res) = app.oneshot(get("/history")).await;
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(res).await;
        assert_eq!(body, "Failed to get history");
        assert!(!body.contains("failing mode"));
    }

    #[tokio::test]
    async fn empty_body_is_stored_as_empty_object() {
        let (app, store) = make_app();

        let Ok(res) = app.oneshot(get_with_method("POST", "/save-history")).await;
        assert_eq!(res.status(), StatusCode::OK);

        let Ok(records) = store.list().await else {
            panic!("list failed");
        };
        assert_eq!(records.first().map(|r| r.data.clone()), Some(json!({})));
    }

    #[tokio::test]
    async fn non_object_json_is_accepted() {
        let (app, store) = make_app();

        let Ok(res) = app.oneshot(post_json("/save-history", "[1, \"two\", null]")).await;
        assert_eq!(res.status(), StatusCode::OK);

        let Ok(records) = store.list().await else {
            panic!("list failed");
        };
        assert_eq!(
            records.first().map(|r| r.data.clone()),
            Some(json!([1, "two", null]))
        );
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_before_the_handler() {
        let (app, store) = make_app();

        let Ok(res) = app.oneshot(post_json("/save-history", "{not json")).await;
        assert!(res.status().is_client_error());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn non_json_body_is_stored_as_empty_object() {
        let (app, store) = make_app();
        let Ok(req) = Request::builder()
            .method("POST")
            .uri("/save-history")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(r#"{"a":1}"#))
        else {
            panic!("valid request");
        };

        let Ok(res) = app.oneshot(req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, "Saved");

        let Ok(records) = store.list().await else {
            panic!("list failed");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records.first().map(|r| r.data.clone()), Some(json!({})));
    }

    #[tokio::test]
    async fn wrong_method_on_api_routes_is_405() {
        let (app, _) = make_app();

        let Ok(res) = app.clone().oneshot(get("/save-history")).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

        let Ok(res) = app.oneshot(post_json("/history", "{}")).await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (app, _) = make_app();
        let Ok(res) = app.oneshot(get("/definitely-not-here.txt")).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn openapi_lists_both_endpoints() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/save-history"));
        assert!(doc.paths.paths.contains_key("/history"));
    }

    fn get_with_method(method: &str, uri: &str) -> Request<Body> {
        let Ok(req) = Request::builder().method(method).uri(uri).body(Body::empty()) else {
            panic!("valid request");
        };
        req
    }
}
