//! Wire types and shared data model for the LearnFlow relay.

mod adapter;
mod resources;

pub use adapter::AdapterError;
pub use resources::{
    DownloadEntry, ResourceEntry, ScanReport, ScannedFile, SearchHit, SearchResults,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message author role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message authored by the end user.
    User,
    /// Message authored by the relay on behalf of the model.
    Assistant,
}

/// Single message in a conversation. Immutable once created; the
/// conversation is owned by the caller and never persisted server-side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Author role.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Inbound body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Ordered conversation, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Optional caller identity used for rate limiting and admin checks.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Shape violations in an inbound chat request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestShapeError {
    /// The `messages` field is absent.
    #[error("messages field is required")]
    MissingMessages,
    /// The `messages` field is not an array.
    #[error("messages must be an array")]
    MessagesNotArray,
    /// A message entry failed to decode.
    #[error("malformed message: {0}")]
    MalformedMessage(String),
    /// No message with role `user` is present.
    #[error("at least one user message is required")]
    NoUserMessage,
}

impl ChatRequest {
    /// Validate and decode a raw JSON body into a chat request.
    ///
    /// Shape violations map to HTTP 400 at the server boundary; everything
    /// past this point is a well-formed conversation with a user turn.
    pub fn from_value(value: Value) -> Result<Self, RequestShapeError> {
        let Some(messages) = value.get("messages") else {
            return Err(RequestShapeError::MissingMessages);
        };
        if !messages.is_array() {
            return Err(RequestShapeError::MessagesNotArray);
        }
        let request: ChatRequest = serde_json::from_value(value)
            .map_err(|err| RequestShapeError::MalformedMessage(err.to_string()))?;
        if !request
            .messages
            .iter()
            .any(|message| message.role == Role::User)
        {
            return Err(RequestShapeError::NoUserMessage);
        }
        Ok(request)
    }

    /// The most recent user message, the one the relay responds to.
    pub fn latest_user_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.role == Role::User)
    }
}

/// Success body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Assistant reply, present on success and fallback paths alike.
    pub message: ChatMessage,
}

/// Body for `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// 429 body carrying the window reset time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitBody {
    pub error: String,
    pub reset_time: DateTime<Utc>,
}

/// 500 body; the only path where the HTTP status itself signals failure.
/// Still carries an assistant-shaped apology so the chat client can render
/// something.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalErrorBody {
    pub error: String,
    pub message: ChatMessage,
}
