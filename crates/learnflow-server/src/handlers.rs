//! Request handlers for the relay API.

use crate::state::AppState;
use axum::Json;
use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use learnflow_core::RelayOutcome;
use learnflow_protocol::{
    ChatMessage, ChatRequest, ChatResponse, HealthResponse, InternalErrorBody, RateLimitBody,
};
use log::debug;
use serde_json::{Value, json};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

/// Apology content for the 500 body.
const INTERNAL_ERROR_APOLOGY: &str =
    "Sorry, something went wrong on our side. Please try again in a moment.";

/// `GET /api/health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        environment: state.environment.as_str().to_string(),
    })
}

/// `POST /api/chat`
///
/// Shape violations are the only client-visible 400s; rate limiting maps to
/// 429; every other path answers 200 with an assistant message.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Json(body): Json<Value>,
) -> Response {
    let request = match ChatRequest::from_value(body) {
        Ok(request) => request,
        Err(err) => {
            debug!("rejecting malformed chat request (error={})", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": err.to_string() })),
            )
                .into_response();
        }
    };

    match state
        .orchestrator
        .handle(&request, &peer.ip().to_string())
        .await
    {
        RelayOutcome::Reply(message) => (StatusCode::OK, Json(ChatResponse { message })).into_response(),
        RelayOutcome::Limited { reset_at } => (
            StatusCode::TOO_MANY_REQUESTS,
            Json(RateLimitBody {
                error: "Too many requests. Please wait before sending more messages.".to_string(),
                reset_time: reset_at,
            }),
        )
            .into_response(),
    }
}

/// Body builder for the catch-panic layer.
pub fn panic_response(_err: Box<dyn Any + Send + 'static>) -> Response {
    let body = InternalErrorBody {
        error: "internal server error".to_string(),
        message: ChatMessage::assistant(INTERNAL_ERROR_APOLOGY),
    };
    let payload = serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string());
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
