//! Typed error for the contextor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Retrieval failed (embedding, index, or malformed metadata).
    #[error("RAG error: {0}")]
    Rag(#[from] rag_store::RagError),

    /// The generative model call failed.
    #[error("LLM error: {0}")]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Failure reported by a non-HTTP generator.
    #[error("generation failed: {0}")]
    Generation(String),
}
