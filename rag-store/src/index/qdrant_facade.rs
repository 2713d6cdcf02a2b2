//! Thin adapter around `qdrant-client` to isolate API usage.
//!
//! Keeps the verbose builder API of `qdrant-client` out of the rest of the
//! crate and exposes the collection through the [`VectorIndex`] seam.

use std::collections::HashMap;

use futures::future::BoxFuture;
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    PointId, SearchParamsBuilder, SearchPointsBuilder, Value as QValue, point_id::PointIdOptions,
    value::Kind,
};
use tracing::{debug, info};

use crate::{config::QdrantConfig, errors::RagError, index::VectorIndex, record::IndexMatch};

/// A facade over the Qdrant client bound to one collection.
pub struct QdrantFacade {
    client: Qdrant,
    collection: String,
    exact: bool,
}

impl QdrantFacade {
    /// Creates a new facade. The client connects lazily on first request.
    pub fn new(cfg: &QdrantConfig, collection: impl Into<String>) -> Result<Self, RagError> {
        let mut builder = Qdrant::from_url(&cfg.url);
        if let Some(key) = &cfg.api_key {
            builder = builder.api_key(key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| RagError::Qdrant(e.to_string()))?;

        Ok(Self {
            client,
            collection: collection.into(),
            exact: cfg.exact_search,
        })
    }

    /// Performs a similarity search and returns matches sorted by score.
    pub async fn search(
        &self,
        vector: Vec<f32>,
        top_k: u64,
        with_payload: bool,
    ) -> Result<Vec<IndexMatch>, RagError> {
        info!(
            "Searching in '{}' with top_k={}, with_payload={}, exact={}",
            self.collection, top_k, with_payload, self.exact
        );

        let mut builder =
            SearchPointsBuilder::new(&self.collection, vector, top_k).with_payload(with_payload);
        if self.exact {
            builder = builder.params(SearchParamsBuilder::default().exact(true));
        }

        let res = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| RagError::Qdrant(e.to_string()))?;

        let out: Vec<IndexMatch> = res
            .result
            .into_iter()
            .map(|r| IndexMatch {
                id: r.id.map(point_id_string).unwrap_or_default(),
                score: r.score,
                metadata: if with_payload {
                    payload_to_json(r.payload)
                } else {
                    serde_json::Value::Null
                },
            })
            .collect();

        debug!("Search completed: {} hits returned", out.len());
        Ok(out)
    }
}

impl VectorIndex for QdrantFacade {
    fn query<'a>(
        &'a self,
        vector: Vec<f32>,
        top_k: u64,
        include_metadata: bool,
    ) -> BoxFuture<'a, Result<Vec<IndexMatch>, RagError>> {
        Box::pin(self.search(vector, top_k, include_metadata))
    }
}

fn point_id_string(id: PointId) -> String {
    match id.point_id_options {
        Some(PointIdOptions::Num(n)) => n.to_string(),
        Some(PointIdOptions::Uuid(u)) => u,
        None => String::new(),
    }
}

/// Converts a Qdrant payload into a JSON object.
fn payload_to_json(payload: HashMap<String, QValue>) -> serde_json::Value {
    serde_json::Value::Object(
        payload
            .into_iter()
            .map(|(k, v)| (k, value_to_json(v)))
            .collect(),
    )
}

fn value_to_json(v: QValue) -> serde_json::Value {
    match v.kind {
        Some(Kind::StringValue(s)) => serde_json::Value::String(s),
        Some(Kind::IntegerValue(i)) => serde_json::Value::Number(i.into()),
        Some(Kind::DoubleValue(f)) => serde_json::json!(f),
        Some(Kind::BoolValue(b)) => serde_json::Value::Bool(b),
        Some(Kind::ListValue(list)) => {
            serde_json::Value::Array(list.values.into_iter().map(value_to_json).collect())
        }
        Some(Kind::StructValue(s)) => payload_to_json(s.fields),
        Some(Kind::NullValue(_)) | None => serde_json::Value::Null,
    }
}
