//! HTTP router for the operator UI.
//!
//! One composable `Router`: JSON endpoints under `/api/`, plus static
//! serving of the scanned images under `/scanned/` so the UI can render
//! thumbnails next to their ledger rows.

use std::path::Path;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the full router from the shared context and the artifact directory.
pub fn api_router(ctx: ApiContext, scanned_dir: &Path) -> Router {
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/scan", post(endpoints::scan::scan))
        .route("/ledger", get(endpoints::ledger::list))
        .route(
            "/ledger/:id",
            put(endpoints::ledger::edit).delete(endpoints::ledger::remove),
        )
        .route("/ledger/:id/save", post(endpoints::ledger::save))
        .route("/ledger/:id/cancel", post(endpoints::ledger::cancel))
        .with_state(ctx);

    Router::new()
        .nest("/api", api)
        .nest_service("/scanned", ServeDir::new(scanned_dir))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use crate::core_state::CoreState;
    use crate::pipeline::artifacts::ArtifactStore;
    use crate::pipeline::capture::MockCaptureTrigger;
    use crate::pipeline::recognition::MockRecognitionClient;
    use crate::pipeline::ScanPipeline;

    const GOOD_RESPONSE: &str = "```json\n{\"chequeNum\":\"123\",\"owner\":\"Bob\",\"date\":\"2024-03-01\",\"amount\":\"50.5\",\"BankName\":\"Bank X\"}\n```";

    struct TestApp {
        router: Router,
        core: Arc<CoreState>,
        _dir: tempfile::TempDir,
    }

    fn app_with(capture: MockCaptureTrigger, recognition: MockRecognitionClient) -> TestApp {
        let dir = tempfile::tempdir().unwrap();
        let core = Arc::new(CoreState::new(dir.path().join("ledger.json")));
        let pipeline = Arc::new(ScanPipeline::new(
            Arc::new(capture),
            Arc::new(recognition),
            ArtifactStore::new(dir.path().join("scanned")),
        ));
        let ctx = ApiContext::new(core.clone(), pipeline);
        let router = api_router(ctx, &dir.path().join("scanned"));
        TestApp {
            router,
            core,
            _dir: dir,
        }
    }

    fn app() -> TestApp {
        app_with(
            MockCaptureTrigger::ok("cheque-1.jpg"),
            MockRecognitionClient::new(GOOD_RESPONSE),
        )
    }

    fn json_request(method: Method, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn draft_id(app: &TestApp) -> String {
        app.core
            .read_ledger()
            .unwrap()
            .entries()
            .iter()
            .find(|e| e.is_draft)
            .unwrap()
            .id
            .clone()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app();
        let response = app
            .router
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["entries"], 1);
    }

    #[tokio::test]
    async fn scan_returns_contract_shape_and_saves_entry() {
        let app = app();
        let id = draft_id(&app);

        let response = app
            .router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/scan",
                serde_json::json!({ "entryId": id }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["chequeNum"], "123");
        assert_eq!(body["owner"], "Bob");
        assert_eq!(body["date"], "2024-03-01");
        assert_eq!(body["amount"], "50.5");
        assert_eq!(body["BankName"], "Bank X");
        assert_eq!(body["path"], "cheque-1.jpg");

        let ledger = app.core.read_ledger().unwrap();
        let merged = ledger.get(&id).unwrap();
        assert!(!merged.is_draft);
        assert_eq!(merged.fields.owner_name.as_deref(), Some("Bob"));
        // Fresh draft appended
        assert_eq!(ledger.entries().len(), 2);
    }

    #[tokio::test]
    async fn two_sequential_scans_save_independent_entries() {
        let app = app();
        let first = draft_id(&app);
        app.router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/scan",
                serde_json::json!({ "entryId": first }),
            ))
            .await
            .unwrap();

        let second = draft_id(&app);
        assert_ne!(first, second);
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/scan",
                serde_json::json!({ "entryId": second }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let ledger = app.core.read_ledger().unwrap();
        assert_eq!(ledger.saved_entries().len(), 2);
        assert_eq!(
            ledger.entries().iter().filter(|e| e.is_draft).count(),
            1
        );
    }

    #[tokio::test]
    async fn pipeline_failure_is_400_and_leaves_ledger_unchanged() {
        let app = app_with(
            MockCaptureTrigger::ok("c.jpg"),
            MockRecognitionClient::new("not json"),
        );
        let id = draft_id(&app);

        let response = app
            .router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/scan",
                serde_json::json!({ "entryId": id }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "scan failed, please retry");

        let ledger = app.core.read_ledger().unwrap();
        assert_eq!(ledger.entries().len(), 1);
        assert!(ledger.get(&id).unwrap().fields.is_empty());
    }

    #[tokio::test]
    async fn scan_of_unknown_entry_is_a_pipeline_failure() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/scan",
                serde_json::json!({ "entryId": "does-not-exist" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"], "scan failed, please retry");
    }

    #[tokio::test]
    async fn empty_entry_id_is_rejected() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/scan",
                serde_json::json!({ "entryId": "  " }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn manual_edit_save_cycle() {
        let app = app();
        let id = draft_id(&app);

        // Save while incomplete: rejected, fields named
        let response = app
            .router
            .clone()
            .oneshot(
                Request::post(format!("/api/ledger/{id}/save"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("chequeNumber"));

        // Fill everything in, then save
        let patch = serde_json::json!({
            "chequeNumber": "55", "bankName": "BankB", "date": "2024-05-05",
            "ownerName": "Carol", "amount": "12", "artifactPath": "55.jpg"
        });
        let response = app
            .router
            .clone()
            .oneshot(json_request(Method::PUT, &format!("/api/ledger/{id}"), patch))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .router
            .clone()
            .oneshot(
                Request::post(format!("/api/ledger/{id}/save"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["isDraft"], false);
        assert!(body["savedOn"].is_string());
    }

    #[tokio::test]
    async fn delete_unknown_entry_is_404() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri("/api/ledger/ghost")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ledger_list_includes_the_draft() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(Request::get("/api/ledger").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["isDraft"], true);
    }

    #[tokio::test]
    async fn scanned_artifacts_are_served_statically() {
        let app = app();
        let scanned = app._dir.path().join("scanned");
        std::fs::create_dir_all(&scanned).unwrap();
        std::fs::write(scanned.join("cheque-1.jpg"), b"jpegbytes").unwrap();

        let response = app
            .router
            .clone()
            .oneshot(
                Request::get("/scanned/cheque-1.jpg")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let app = app();
        let response = app
            .router
            .clone()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
