//! Test doubles for the extraction and inference seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::generation::extract::{ExtractionError, TextExtractor};
use crate::generation::inference::ProfileInference;
use crate::llm_client::InferenceError;
use crate::models::profile::tests::JANE_DOE_JSON;

/// Returns fixed text for any input.
pub struct StaticExtractor(pub &'static str);

impl TextExtractor for StaticExtractor {
    fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(self.0.to_string())
    }
}

pub struct FailingExtractor;

impl TextExtractor for FailingExtractor {
    fn extract(&self, _bytes: &[u8]) -> Result<String, ExtractionError> {
        Err(ExtractionError::NoText)
    }
}

/// Replies with a fixed response and counts calls.
pub struct StubInference {
    response: String,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl StubInference {
    pub fn returning(response: impl Into<String>) -> Arc<Self> {
        Arc::new(StubInference {
            response: response.into(),
            calls: AtomicUsize::new(0),
            delay: None,
        })
    }

    pub fn jane_doe() -> Arc<Self> {
        Self::returning(JANE_DOE_JSON)
    }

    /// Waits `delay` before answering, for cancellation and conflict tests.
    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(StubInference {
            response: JANE_DOE_JSON.to_string(),
            calls: AtomicUsize::new(0),
            delay: Some(delay),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProfileInference for StubInference {
    async fn complete(&self, _prompt: &str) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.response.clone())
    }
}

pub struct FailingInference;

#[async_trait]
impl ProfileInference for FailingInference {
    async fn complete(&self, _prompt: &str) -> Result<String, InferenceError> {
        Err(InferenceError::Timeout { secs: 60 })
    }
}
