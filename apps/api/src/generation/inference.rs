//! Inference seam: prompt in, raw model text out.
//!
//! `AppState` carries an `Arc<dyn ProfileInference>`; `LlmClient` is the production
//! backend, tests swap in stubs.

use async_trait::async_trait;

use crate::generation::prompts::OPTIMIZE_SYSTEM;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{InferenceError, LlmClient};

#[async_trait]
pub trait ProfileInference: Send + Sync {
    /// Sends one optimization prompt and returns the model's text, fences stripped.
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError>;
}

pub fn optimize_system_prompt() -> String {
    format!("{OPTIMIZE_SYSTEM} {JSON_ONLY_SYSTEM}")
}

#[async_trait]
impl ProfileInference for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, InferenceError> {
        self.call_text(prompt, &optimize_system_prompt()).await
    }
}
