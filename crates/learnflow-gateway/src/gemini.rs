//! Gemini `generateContent` client.

use crate::{GatewayError, GenerationOptions, TextGenerator};
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// HTTP client for the Gemini generation endpoint.
#[derive(Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiGateway {
    /// Create a gateway for the given credential and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiGateway {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            BASE_URL,
            model = self.model,
            api_key = self.api_key
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        };
        debug!(
            "calling generation endpoint (model={}, prompt_len={})",
            self.model,
            prompt.len()
        );

        let response = self.client.post(url).json(&request).send().await?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                code,
                message: error_message_from_body(&body),
            });
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::MalformedPayload(err.to_string()))?;
        extract_text(payload)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GatewayError> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| {
            GatewayError::MalformedPayload("response carried no candidate text".to_string())
        })
}

fn error_message_from_body(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status = wrapper.error.status.unwrap_or_default();
            let message = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status.is_empty() {
                message
            } else {
                format!("{status}: {message}")
            }
        })
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decode(payload: &str) -> GenerateContentResponse {
        serde_json::from_str(payload).expect("payload")
    }

    #[test]
    fn extract_text_reads_first_candidate() {
        let response = decode(
            r#"{
                "candidates": [
                    { "content": { "parts": [{ "text": "answer" }] } },
                    { "content": { "parts": [{ "text": "second" }] } }
                ]
            }"#,
        );
        assert_eq!(extract_text(response).expect("text"), "answer");
    }

    #[test]
    fn extract_text_rejects_missing_candidates() {
        let response = decode(r#"{}"#);
        let err = extract_text(response).expect_err("malformed");
        assert!(matches!(err, GatewayError::MalformedPayload(_)));
    }

    #[test]
    fn extract_text_rejects_partless_content() {
        let response = decode(r#"{ "candidates": [{ "content": { "parts": [] } }] }"#);
        assert!(extract_text(response).is_err());
    }

    #[test]
    fn error_message_prefers_structured_body() {
        let message = error_message_from_body(
            r#"{ "error": { "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED" } }"#,
        );
        assert_eq!(message, "RESOURCE_EXHAUSTED: quota exceeded");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message_from_body("plain failure"), "plain failure");
    }
}
