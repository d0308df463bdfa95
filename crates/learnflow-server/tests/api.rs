//! HTTP surface tests over stubbed collaborators.

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::connect_info::ConnectInfo;
use axum::http::{Request, StatusCode};
use learnflow_config::{Environment, RateLimitConfig};
use learnflow_context::{CourseCatalog, NavigationMap, PromptComposer};
use learnflow_core::{AllowListAuthorizer, ChatOrchestrator, RelayServices};
use learnflow_gateway::{GenerationOptions, TextGenerator};
use learnflow_server::{AppState, router};
use learnflow_test_utils::{FailingGenerator, FixedGenerator, StubSearchProvider};
use learnflow_tools::{FileScanner, ResourceIndex};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn app(generator: Arc<dyn TextGenerator>, max_requests: u32) -> Router {
    let services = RelayServices {
        composer: PromptComposer::new(
            Arc::new(CourseCatalog::default_catalog()),
            Arc::new(NavigationMap::default_map()),
        ),
        index: Arc::new(ResourceIndex::default()),
        generator,
        search: Arc::new(StubSearchProvider::default()),
        authorizer: Arc::new(AllowListAuthorizer::default()),
        scanner: FileScanner::default(),
        generation: GenerationOptions::default(),
        scan_root: PathBuf::from("."),
    };
    let orchestrator = ChatOrchestrator::new(
        services,
        &RateLimitConfig {
            window_secs: 60,
            max_requests,
            sweep_threshold: 1024,
        },
    );
    router(Arc::new(AppState {
        orchestrator,
        environment: Environment::Development,
    }))
}

fn chat_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app(Arc::new(FixedGenerator::new("ok")), 10);
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .expect("request");

    let response = app.oneshot(request).await.expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["environment"], "development");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn chat_rejects_non_array_messages() {
    let app = app(Arc::new(FixedGenerator::new("ok")), 10);
    let response = app
        .oneshot(chat_request(json!({ "messages": "not-an-array" })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "messages must be an array");
}

#[tokio::test]
async fn chat_rejects_conversation_without_user_message() {
    let app = app(Arc::new(FixedGenerator::new("ok")), 10);
    let response = app
        .oneshot(chat_request(json!({
            "messages": [{ "role": "assistant", "content": "hi" }]
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_returns_assistant_reply() {
    let app = app(Arc::new(FixedGenerator::new("the answer")), 10);
    let response = app
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "explain unit 2" }],
            "user_id": "u-1"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"]["role"], "assistant");
    assert_eq!(body["message"]["content"], "the answer");
}

#[tokio::test]
async fn chat_rate_limits_after_budget() {
    let app = app(Arc::new(FixedGenerator::new("ok")), 1);
    let payload = json!({
        "messages": [{ "role": "user", "content": "hello" }],
        "user_id": "same-user"
    });

    let first = app
        .clone()
        .oneshot(chat_request(payload.clone()))
        .await
        .expect("response");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(chat_request(payload))
        .await
        .expect("response");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(second).await;
    assert!(body["error"].as_str().expect("error").contains("Too many"));
    assert!(body["reset_time"].is_string());
}

#[tokio::test]
async fn gateway_failure_still_answers_200() {
    let app = app(Arc::new(FailingGenerator::new("down")), 10);
    let response = app
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "hello" }]
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"]["role"], "assistant");
    assert!(
        body["message"]["content"]
            .as_str()
            .expect("content")
            .contains("Hello!")
    );
}

#[tokio::test]
async fn scan_error_is_an_assistant_message_not_a_500() {
    let app = app(Arc::new(FixedGenerator::new("unused")), 10);
    let response = app
        .oneshot(chat_request(json!({
            "messages": [{ "role": "user", "content": "/scan nonexistent/path" }]
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(
        body["message"]["content"]
            .as_str()
            .expect("content")
            .contains("Scan Error")
    );
}
