//! Boundary to the external text generation service.
//!
//! One trait, one HTTP implementation. A single attempt per logical call;
//! the orchestrator owns every fallback decision.

mod error;
mod gemini;

pub use error::GatewayError;
pub use gemini::GeminiGateway;

use async_trait::async_trait;

/// Knobs forwarded to the generation endpoint.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1024,
        }
    }
}

/// Text generation interface for the relay.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt. Exactly one upstream attempt.
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GatewayError>;
}
