//! Vector index abstraction and its managed-service backends.

use futures::future::BoxFuture;

use crate::{errors::RagError, record::IndexMatch};

pub mod pinecone;
pub mod qdrant_facade;

/// Nearest-neighbour query interface of a vector index.
pub trait VectorIndex: Send + Sync {
    /// Returns up to `top_k` matches for `vector`, most similar first as
    /// ordered by the service. With `include_metadata = false` the metadata
    /// of each match is `Null`.
    fn query<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: u64,
        include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>>;
}
