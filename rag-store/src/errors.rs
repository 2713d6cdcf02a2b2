//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for rag-store operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Invalid or unsupported configuration (including missing credentials
    /// discovered on first use).
    #[error("config error: {0}")]
    Config(String),

    /// Embedding model call failed.
    #[error("embedding error: {0}")]
    Embedding(#[from] AiLlmError),

    /// Embedding dimensionality differs from the configured index dimension.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Pinecone transport errors.
    #[error("vector index transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Pinecone returned a non-successful HTTP status.
    #[error("vector index HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
        snippet: String,
    },

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),

    /// Index response could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    /// A match lacked the `text` metadata passage.
    #[error("match '{id}' has no string `text` metadata")]
    MissingText { id: String },
}
