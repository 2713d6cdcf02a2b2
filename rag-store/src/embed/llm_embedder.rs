//! Embedding provider backed by the shared [`LlmServiceProfiles`].

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use futures::future::BoxFuture;
use tracing::warn;

use crate::{EmbeddingsProvider, RagError};

/// Uses the service's **embedding** profile, optionally enforcing a dimension.
#[derive(Clone)]
pub struct LlmEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: Option<usize>,
}

impl LlmEmbedder {
    pub fn new(svc: Arc<LlmServiceProfiles>, dim: Option<usize>) -> Self {
        Self { svc, dim }
    }
}

impl EmbeddingsProvider for LlmEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            let vector = self.svc.embed(text).await?;

            if let Some(want) = self.dim {
                if vector.len() != want {
                    warn!(got = vector.len(), want, "embedding dimension mismatch");
                    return Err(RagError::VectorSizeMismatch {
                        got: vector.len(),
                        want,
                    });
                }
            }

            Ok(vector)
        })
    }
}
