//! Pinecone REST client (query path only).
//!
//! The data-plane host of an index is looked up once through the control plane
//! (`GET {controller}/indexes/{name}`) and cached for the life of the process,
//! unless it was configured explicitly.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::{
    config::{PINECONE_API_VERSION, PineconeConfig},
    errors::RagError,
    index::VectorIndex,
    record::IndexMatch,
};

/// Handle to a single Pinecone index.
pub struct PineconeIndex {
    http: reqwest::Client,
    api_key: Option<String>,
    controller_url: String,
    index_name: String,
    host: OnceCell<String>,
}

impl PineconeIndex {
    /// Creates a handle; performs no network I/O.
    ///
    /// # Errors
    /// Returns `RagError::Transport` if the HTTP client cannot be built.
    pub fn new(cfg: &PineconeConfig, index_name: impl Into<String>) -> Result<Self, RagError> {
        let http = reqwest::Client::builder().build()?;
        let host = match &cfg.index_host {
            Some(h) => OnceCell::new_with(Some(with_scheme(h))),
            None => OnceCell::new(),
        };

        Ok(Self {
            http,
            api_key: cfg.api_key.clone(),
            controller_url: cfg.controller_url.trim_end_matches('/').to_string(),
            index_name: index_name.into(),
            host,
        })
    }

    fn api_key(&self) -> Result<&str, RagError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| RagError::Config("missing required environment variable: PINECONE_API_KEY".into()))
    }

    async fn host(&self) -> Result<&str, RagError> {
        let host = self
            .host
            .get_or_try_init(|| async {
                let url = format!("{}/indexes/{}", self.controller_url, self.index_name);
                debug!("GET {url}");
                let resp = self
                    .http
                    .get(&url)
                    .header("Api-Key", self.api_key()?)
                    .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
                    .send()
                    .await?;
                let desc: IndexDescription = decode(resp, &url).await?;
                info!(index = %self.index_name, host = %desc.host, "resolved Pinecone index host");
                Ok::<_, RagError>(with_scheme(&desc.host))
            })
            .await?;
        Ok(host.as_str())
    }

    async fn query_inner(
        &self,
        vector: Vec<f32>,
        top_k: u64,
        include_metadata: bool,
    ) -> Result<Vec<IndexMatch>, RagError> {
        let key = self.api_key()?;
        let url = format!("{}/query", self.host().await?);
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata,
            include_values: false,
        };

        debug!(top_k, include_metadata, "POST {url}");
        let resp = self
            .http
            .post(&url)
            .header("Api-Key", key)
            .header("X-Pinecone-API-Version", PINECONE_API_VERSION)
            .json(&body)
            .send()
            .await?;
        let out: QueryResponse = decode(resp, &url).await?;

        debug!(hits = out.matches.len(), "Pinecone query completed");
        Ok(out
            .matches
            .into_iter()
            .map(|m| IndexMatch {
                id: m.id,
                score: m.score,
                metadata: m.metadata.unwrap_or(serde_json::Value::Null),
            })
            .collect())
    }
}

impl VectorIndex for PineconeIndex {
    fn query<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: u64,
        include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
        Box::pin(self.query_inner(vector, top_k, include_metadata))
    }
}

/// Pinecone reports hosts without a scheme.
fn with_scheme(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    url: &str,
) -> Result<T, RagError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(RagError::HttpStatus {
            status,
            url: url.to_string(),
            snippet: text.chars().take(240).collect(),
        });
    }
    resp.json::<T>()
        .await
        .map_err(|e| RagError::Parse(format!("{url}: {e}")))
}

/* ==========================
HTTP payloads
========================== */

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: u64,
    include_metadata: bool,
    include_values: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<PineconeMatch>,
}

#[derive(Debug, Deserialize)]
struct PineconeMatch {
    id: String,
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<serde_json::Value>,
}
