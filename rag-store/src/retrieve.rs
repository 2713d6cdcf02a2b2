//! Query-side retrieval: embed the question, search the index, join passages.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::{embed::EmbeddingsProvider, errors::RagError, index::VectorIndex, record::IndexMatch};

/// Separator between retrieved passages in the context block.
pub const PASSAGE_SEPARATOR: &str = "\n\n";

/// Embeds questions and fetches their context from a vector index.
///
/// No caching: identical questions are embedded and searched every time.
#[derive(Clone)]
pub struct Retriever {
    embedder: Arc<dyn EmbeddingsProvider>,
    index: Arc<dyn VectorIndex>,
}

impl Retriever {
    pub fn new(embedder: Arc<dyn EmbeddingsProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Returns the raw matches for `query`, at most `top_k`, in index order.
    ///
    /// # Errors
    /// Embedding or index failures, unchanged.
    pub async fn matches(&self, query: &str, top_k: u64) -> Result<Vec<IndexMatch>, RagError> {
        let vector = self.embedder.embed(query).await?;
        trace!(dim = vector.len(), "query embedded");

        let mut hits = self.index.query(vector, top_k, true).await?;
        hits.truncate(usize::try_from(top_k).unwrap_or(usize::MAX));
        Ok(hits)
    }

    /// Builds the context block for `query`: the `text` metadata of the top
    /// matches joined by a blank line. Zero matches yield `""`.
    ///
    /// # Errors
    /// Embedding or index failures, or a match without `text` metadata.
    pub async fn retrieve(&self, query: &str, top_k: u64) -> Result<String, RagError> {
        let hits = self.matches(query, top_k).await?;
        let context = join_passages(&hits)?;
        debug!(hits = hits.len(), chars = context.len(), "context retrieved");
        Ok(context)
    }
}

/// Joins the `text` metadata of `hits` with [`PASSAGE_SEPARATOR`], preserving order.
///
/// # Errors
/// `RagError::MissingText` for the first match without a string `text`.
pub fn join_passages(hits: &[IndexMatch]) -> Result<String, RagError> {
    let texts = hits
        .iter()
        .map(|h| h.text().ok_or_else(|| RagError::MissingText { id: h.id.clone() }))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(texts.join(PASSAGE_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use serde_json::json;
    use std::sync::Mutex;

    struct FixedEmbedder(Result<Vec<f32>, ()>);

    impl EmbeddingsProvider for FixedEmbedder {
        fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
            let out = self
                .0
                .clone()
                .map_err(|_| RagError::Config("embedder offline".into()));
            Box::pin(async move { out })
        }
    }

    /// Returns canned matches and records the requested `top_k`.
    struct CannedIndex {
        hits: Vec<IndexMatch>,
        seen: Mutex<Vec<(u64, bool)>>,
    }

    impl CannedIndex {
        fn new(hits: Vec<IndexMatch>) -> Self {
            Self {
                hits,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl VectorIndex for CannedIndex {
        fn query<'a>(
            &'a self,
            _vector: Vec<f32>,
            top_k: u64,
            include_metadata: bool,
        ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
            self.seen.lock().unwrap().push((top_k, include_metadata));
            let hits = self.hits.clone();
            Box::pin(async move { Ok(hits) })
        }
    }

    fn hit(id: &str, text: &str) -> IndexMatch {
        IndexMatch {
            id: id.into(),
            score: 0.5,
            metadata: json!({ "text": text, "source": "handbook.pdf" }),
        }
    }

    fn retriever(hits: Vec<IndexMatch>) -> (Retriever, Arc<CannedIndex>) {
        let index = Arc::new(CannedIndex::new(hits));
        let r = Retriever::new(Arc::new(FixedEmbedder(Ok(vec![0.1, 0.2]))), index.clone());
        (r, index)
    }

    #[tokio::test]
    async fn joins_passages_in_index_order() {
        let (r, index) = retriever(vec![hit("2", "Second."), hit("1", "First.")]);
        let ctx = r.retrieve("q", 5).await.unwrap();
        assert_eq!(ctx, "Second.\n\nFirst.");
        assert_eq!(*index.seen.lock().unwrap(), vec![(5, true)]);
    }

    #[tokio::test]
    async fn zero_matches_yield_empty_context() {
        let (r, _) = retriever(vec![]);
        assert_eq!(r.retrieve("q", 5).await.unwrap(), "");
    }

    #[tokio::test]
    async fn never_returns_more_than_top_k_passages() {
        let (r, _) = retriever(vec![hit("a", "A"), hit("b", "B"), hit("c", "C")]);
        assert_eq!(r.retrieve("q", 2).await.unwrap(), "A\n\nB");
    }

    #[tokio::test]
    async fn match_without_text_is_an_error() {
        let mut bad = hit("x", "");
        bad.metadata = json!({ "source": "handbook.pdf" });
        let (r, _) = retriever(vec![hit("a", "A"), bad]);
        match r.retrieve("q", 5).await {
            Err(RagError::MissingText { id }) => assert_eq!(id, "x"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn embedding_failure_skips_the_index() {
        let index = Arc::new(CannedIndex::new(vec![hit("a", "A")]));
        let r = Retriever::new(Arc::new(FixedEmbedder(Err(()))), index.clone());
        assert!(r.retrieve("q", 5).await.is_err());
        assert!(index.seen.lock().unwrap().is_empty());
    }
}
