//! Embedding abstraction.

use futures::future::BoxFuture;

use crate::errors::RagError;

pub mod llm_embedder;

/// Provider interface for query embedding.
///
/// Async because real providers (Ollama, Gemini) perform HTTP requests.
/// Implement this trait to plug in another backend or a test double.
pub trait EmbeddingsProvider: Send + Sync {
    /// Encodes `text` into a vector of the model's fixed dimension.
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;
}
