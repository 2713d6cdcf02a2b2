//! Query-side RAG over a managed vector index.
//!
//! This crate provides:
//! - [`EmbeddingsProvider`] / [`VectorIndex`] seams, so services can be swapped or faked
//! - Pinecone (REST) and Qdrant backends for the index
//! - [`Retriever`], which turns a question into a context block of passages

mod config;
mod embed;
mod errors;
mod index;
mod record;
mod retrieve;

pub use config::{
    DEFAULT_INDEX_NAME, DEFAULT_TOP_K, IndexBackend, PineconeConfig, QdrantConfig, RagConfig,
};
pub use embed::{EmbeddingsProvider, llm_embedder::LlmEmbedder};
pub use errors::RagError;
pub use index::{VectorIndex, pinecone::PineconeIndex, qdrant_facade::QdrantFacade};
pub use record::IndexMatch;
pub use retrieve::{PASSAGE_SEPARATOR, Retriever, join_passages};

use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use tracing::info;

impl Retriever {
    /// Wires the configured backend and the service's embedding profile.
    ///
    /// Performs no network I/O; credentials are checked on first use.
    ///
    /// # Errors
    /// Returns `RagError` if the index client cannot be constructed.
    pub fn from_config(cfg: &RagConfig, svc: Arc<LlmServiceProfiles>) -> Result<Self, RagError> {
        cfg.validate()?;

        let index: Arc<dyn VectorIndex> = match cfg.backend {
            IndexBackend::Pinecone => Arc::new(PineconeIndex::new(&cfg.pinecone, &cfg.index_name)?),
            IndexBackend::Qdrant => Arc::new(QdrantFacade::new(&cfg.qdrant, &cfg.index_name)?),
        };
        let embedder = Arc::new(LlmEmbedder::new(svc, cfg.embedding_dim));

        info!(backend = ?cfg.backend, index = %cfg.index_name, top_k = cfg.top_k, "retriever ready");
        Ok(Retriever::new(embedder, index))
    }
}
