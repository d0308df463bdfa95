use async_trait::async_trait;
use learnflow_gateway::{GatewayError, GenerationOptions, TextGenerator};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct FixedGenerator {
    response: String,
    pub last_prompt: Arc<Mutex<Option<String>>>,
}

impl FixedGenerator {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            last_prompt: Arc::new(Mutex::new(None)),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl TextGenerator for FixedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        *self.last_prompt.lock() = Some(prompt.to_string());
        Ok(self.response.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FailingGenerator {
    message: String,
}

impl FailingGenerator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, GatewayError> {
        Err(GatewayError::Status {
            code: 503,
            message: self.message.clone(),
        })
    }
}
