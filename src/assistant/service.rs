//! The AI capability seam.

use async_trait::async_trait;

use crate::error::EngineResult;

use super::request::AiRequest;

/// A hosted generative model.
///
/// Implementations return the model's raw text answer (JSON text when the
/// request carries a response schema). Transport failures and non-success
/// statuses are reported as `AiRequest` errors; callers outside the
/// [`Assistant`](super::Assistant) must not surface them to end users.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Sends one request and returns the answer text.
    async fn generate(&self, request: &AiRequest) -> EngineResult<String>;
}
