//! Webhook handling for Ashby `candidateStageChange` events.
//!
//! The pipeline is a single linear pass: verify the signature (when a secret
//! is configured), validate the envelope, extract the stage-change fields,
//! render the assessment PDF, and upload it to the candidate's profile.

use axum::{extract::State, http::HeaderMap, Json};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

pub mod signature;

use crate::errors::AppError;
use crate::report::{render_assessment_pdf, AssessmentReport};
use crate::state::AppState;

/// The only webhook action this service reacts to.
pub const STAGE_CHANGE_ACTION: &str = "candidateStageChange";

#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub data: WebhookData,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookData {
    /// Kept as a raw map so an explicitly empty `{}` can be rejected the same
    /// way as an absent one, while leaf fields stay lenient.
    #[serde(default)]
    pub application: Option<Map<String, Value>>,
}

/// The fields the pipeline needs, extracted with placeholder defaults.
/// Missing leaves never reject the event; only the envelope is strict.
#[derive(Debug, PartialEq)]
pub struct StageChange {
    pub candidate_id: String,
    pub candidate_name: String,
    pub job_id: String,
    pub job_title: String,
    pub stage_name: String,
}

impl StageChange {
    pub fn from_application(application: &Map<String, Value>) -> Self {
        Self {
            candidate_id: leaf(application, "candidate", "id", "N/A"),
            candidate_name: leaf(application, "candidate", "name", "Unknown Candidate"),
            job_id: leaf(application, "job", "id", "N/A"),
            job_title: leaf(application, "job", "title", "Unknown Job"),
            stage_name: leaf(application, "currentInterviewStage", "title", "Unknown Stage"),
        }
    }
}

fn leaf(application: &Map<String, Value>, object: &str, field: &str, default: &str) -> String {
    application
        .get(object)
        .and_then(|o| o.get(field))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// POST /webhook
///
/// Takes the raw body so signature verification sees the exact payload the
/// sender signed. Responds with a fixed success body once the pipeline runs
/// to completion; an upload failure is logged but does not change the
/// response.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    if let Some(secret) = &state.config.webhook_secret {
        let presented = headers
            .get(signature::SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing webhook signature".to_string()))?;
        if !signature::verify(secret, &body, presented) {
            return Err(AppError::Unauthorized(
                "Invalid webhook signature".to_string(),
            ));
        }
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;

    if event.action != STAGE_CHANGE_ACTION {
        return Err(AppError::Validation("Invalid webhook action".to_string()));
    }

    let application = event
        .data
        .application
        .filter(|application| !application.is_empty())
        .ok_or_else(|| AppError::Validation("Missing application data".to_string()))?;

    let change = StageChange::from_application(&application);
    info!(
        candidate = %change.candidate_name,
        job = %change.job_title,
        stage = %change.stage_name,
        "processing candidate stage change"
    );

    let report = AssessmentReport::placeholder(&change.candidate_name);
    let file_path = render_assessment_pdf(&report, &change.job_title, &change.job_id)?;

    // Swallowed on purpose: listing errors hard-fail, upload errors do not.
    if !state.ashby.upload_file(&change.candidate_id, &file_path).await {
        warn!(
            candidate_id = %change.candidate_id,
            "assessment upload failed; reporting success to the sender regardless"
        );
    }

    Ok(Json(json!({"status": "success"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ashby::AshbyClient;
    use crate::config::Config;
    use crate::notify::Notifier;
    use crate::routes::build_router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(base_url: String, webhook_secret: Option<String>) -> AppState {
        AppState {
            ashby: AshbyClient::with_base_url("test-key".to_string(), base_url),
            notifier: Notifier::new(None),
            config: Config {
                ashby_api_key: "test-key".to_string(),
                webhook_secret,
                smtp: None,
                port: 0,
                rust_log: "info".to_string(),
            },
        }
    }

    /// Stub upstream that counts upload calls; returns 500 when `fail` is set.
    async fn spawn_upload_stub(uploads: Arc<AtomicUsize>, fail: bool) -> String {
        let router = Router::new().route(
            "/candidate.uploadFile",
            post(move || {
                let uploads = uploads.clone();
                async move {
                    uploads.fetch_add(1, Ordering::SeqCst);
                    if fail {
                        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
                    } else {
                        (StatusCode::OK, "{\"success\":true}")
                    }
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn stage_change_body() -> String {
        serde_json::to_string(&json!({
            "action": STAGE_CHANGE_ACTION,
            "data": {
                "application": {
                    "candidate": {"id": "cand-1", "name": "Ada Lovelace"},
                    "job": {"id": "job-1", "title": "Senior AI Engineer (Remote)"},
                    "currentInterviewStage": {"id": "stage-1", "title": "Offer"}
                }
            }
        }))
        .unwrap()
    }

    fn webhook_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn rejects_unrecognized_action_without_calling_upstream() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, None));

        let body = serde_json::to_string(&json!({
            "action": "candidateHired",
            "data": {"application": {"candidate": {"id": "cand-1"}}}
        }))
        .unwrap();

        let response = app.oneshot(webhook_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejects_missing_application_data() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, None));

        let body =
            serde_json::to_string(&json!({"action": STAGE_CHANGE_ACTION, "data": {}})).unwrap();

        let response = app.oneshot(webhook_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error = response_json(response).await;
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn rejects_empty_application_object() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, None));

        let body = serde_json::to_string(
            &json!({"action": STAGE_CHANGE_ACTION, "data": {"application": {}}}),
        )
        .unwrap();

        let response = app.oneshot(webhook_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, None));

        let response = app
            .oneshot(webhook_request("not json".to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn renders_and_uploads_on_stage_change() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, None));

        let response = app.oneshot(webhook_request(stage_change_body())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, json!({"status": "success"}));
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn upload_failure_still_reports_success() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), true).await;
        let app = build_router(test_state(base_url, None));

        let response = app.oneshot(webhook_request(stage_change_body())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await, json!({"status": "success"}));
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_signature_is_rejected_when_secret_configured() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, Some("shh".to_string())));

        let response = app.oneshot(webhook_request(stage_change_body())).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_signature_is_rejected() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, Some("shh".to_string())));

        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .header(signature::SIGNATURE_HEADER, "deadbeef")
            .body(Body::from(stage_change_body()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_signature_passes_the_guard() {
        let uploads = Arc::new(AtomicUsize::new(0));
        let base_url = spawn_upload_stub(uploads.clone(), false).await;
        let app = build_router(test_state(base_url, Some("shh".to_string())));

        let body = stage_change_body();
        let digest = signature::compute("shh", body.as_bytes());
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .header(signature::SIGNATURE_HEADER, digest)
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(uploads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn extraction_defaults_missing_leaves_to_placeholders() {
        let application = json!({"candidate": {"id": "cand-1"}})
            .as_object()
            .cloned()
            .unwrap();
        let change = StageChange::from_application(&application);
        assert_eq!(change.candidate_id, "cand-1");
        assert_eq!(change.candidate_name, "Unknown Candidate");
        assert_eq!(change.job_id, "N/A");
        assert_eq!(change.job_title, "Unknown Job");
        assert_eq!(change.stage_name, "Unknown Stage");
    }
}
