//! Runtime configuration for the vector index and retrieval.

use std::{fmt, str::FromStr};

use ai_llm_service::error_handler::env_opt;

use crate::errors::RagError;

/// Name of the index holding the guideline passages.
pub const DEFAULT_INDEX_NAME: &str = "guideline-rag";
/// Number of passages retrieved per question.
pub const DEFAULT_TOP_K: u64 = 5;
pub const DEFAULT_PINECONE_CONTROLLER_URL: &str = "https://api.pinecone.io";
pub const PINECONE_API_VERSION: &str = "2024-07";
pub const DEFAULT_QDRANT_URL: &str = "http://localhost:6334";

/// Which managed service answers nearest-neighbour queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexBackend {
    Pinecone,
    Qdrant,
}

impl FromStr for IndexBackend {
    type Err = RagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pinecone" => Ok(IndexBackend::Pinecone),
            "qdrant" => Ok(IndexBackend::Qdrant),
            other => Err(RagError::Config(format!(
                "VECTOR_BACKEND must be `pinecone` or `qdrant`, got `{other}`"
            ))),
        }
    }
}

/// Pinecone connection settings.
#[derive(Clone)]
pub struct PineconeConfig {
    /// `PINECONE_API_KEY`; checked on first query, not at startup.
    pub api_key: Option<String>,
    /// Control-plane base used to resolve the index host.
    pub controller_url: String,
    /// Data-plane host; when `None` it is looked up by index name.
    pub index_host: Option<String>,
}

impl fmt::Debug for PineconeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PineconeConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("controller_url", &self.controller_url)
            .field("index_host", &self.index_host)
            .finish()
    }
}

/// Qdrant connection settings.
#[derive(Clone)]
pub struct QdrantConfig {
    /// Qdrant gRPC endpoint, e.g. `http://localhost:6334`.
    pub url: String,
    /// Optional API key for Qdrant Cloud.
    pub api_key: Option<String>,
    /// Exact search flag (false = HNSW ANN).
    pub exact_search: bool,
}

impl fmt::Debug for QdrantConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QdrantConfig")
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("exact_search", &self.exact_search)
            .finish()
    }
}

/// Configuration for retrieval.
#[derive(Clone, Debug)]
pub struct RagConfig {
    pub backend: IndexBackend,
    /// Pinecone index name / Qdrant collection name.
    pub index_name: String,
    /// Default number of passages per question.
    pub top_k: u64,
    /// Expected embedding dimension; `None` skips the check.
    pub embedding_dim: Option<usize>,
    pub pinecone: PineconeConfig,
    pub qdrant: QdrantConfig,
}

impl RagConfig {
    /// Pinecone-backed config for the fixed guideline index.
    pub fn new_default() -> Self {
        Self {
            backend: IndexBackend::Pinecone,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            top_k: DEFAULT_TOP_K,
            embedding_dim: None,
            pinecone: PineconeConfig {
                api_key: None,
                controller_url: DEFAULT_PINECONE_CONTROLLER_URL.to_string(),
                index_host: None,
            },
            qdrant: QdrantConfig {
                url: DEFAULT_QDRANT_URL.to_string(),
                api_key: None,
                exact_search: false,
            },
        }
    }

    /// Reads overrides from the environment on top of [`RagConfig::new_default`].
    ///
    /// Variables: `VECTOR_BACKEND`, `PINECONE_API_KEY`, `PINECONE_CONTROLLER_URL`,
    /// `PINECONE_INDEX_HOST`, `QDRANT_URL`, `QDRANT_API_KEY`, `RAG_EXACT_SEARCH`,
    /// `RAG_TOP_K`, `EMBEDDING_DIM`.
    ///
    /// # Errors
    /// Returns `RagError::Config` for malformed values.
    pub fn from_env() -> Result<Self, RagError> {
        Self::from_lookup(env_opt)
    }

    /// Same as [`RagConfig::from_env`], reading variables through `var`.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self, RagError> {
        let mut cfg = Self::new_default();

        if let Some(b) = var("VECTOR_BACKEND") {
            cfg.backend = b.parse()?;
        }
        cfg.top_k = parse_var(&var, "RAG_TOP_K", DEFAULT_TOP_K)?;
        cfg.embedding_dim = var("EMBEDDING_DIM")
            .map(|v| {
                v.parse::<usize>()
                    .map_err(|_| RagError::Config(format!("EMBEDDING_DIM: expected usize, got `{v}`")))
            })
            .transpose()?;

        cfg.pinecone.api_key = var("PINECONE_API_KEY");
        if let Some(url) = var("PINECONE_CONTROLLER_URL") {
            cfg.pinecone.controller_url = url;
        }
        cfg.pinecone.index_host = var("PINECONE_INDEX_HOST");

        if let Some(url) = var("QDRANT_URL") {
            cfg.qdrant.url = url;
        }
        cfg.qdrant.api_key = var("QDRANT_API_KEY");
        cfg.qdrant.exact_search = parse_var(&var, "RAG_EXACT_SEARCH", false)?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates config values.
    pub fn validate(&self) -> Result<(), RagError> {
        if self.index_name.trim().is_empty() {
            return Err(RagError::Config("index name is empty".into()));
        }
        if self.top_k == 0 {
            return Err(RagError::Config("top_k must be > 0".into()));
        }
        if self.embedding_dim == Some(0) {
            return Err(RagError::Config("EMBEDDING_DIM must be > 0".into()));
        }
        match self.backend {
            IndexBackend::Pinecone if self.pinecone.controller_url.trim().is_empty() => {
                Err(RagError::Config("PINECONE_CONTROLLER_URL is empty".into()))
            }
            IndexBackend::Qdrant if self.qdrant.url.trim().is_empty() => {
                Err(RagError::Config("QDRANT_URL is empty".into()))
            }
            _ => Ok(()),
        }
    }
}

fn parse_var<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, RagError> {
    match var(key) {
        Some(v) => v
            .parse::<T>()
            .map_err(|_| RagError::Config(format!("{key}: cannot parse `{v}`"))),
        None => Ok(default),
    }
}
