//! Generation seam used by the ask pipeline.

use ai_llm_service::LlmServiceProfiles;
use futures::future::BoxFuture;

use crate::error::ContextorError;

/// Turns a finished prompt into the model's answer text.
pub trait AnswerGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ContextorError>>;
}

impl AnswerGenerator for LlmServiceProfiles {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, ContextorError>> {
        Box::pin(async move { Ok(LlmServiceProfiles::generate(self, prompt).await?) })
    }
}
