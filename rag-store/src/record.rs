//! Core data models used by the library.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One nearest-neighbour match, in the order the index returned it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndexMatch {
    pub id: String,
    pub score: f32,
    /// Stored metadata; the passage lives under `text`.
    #[serde(default)]
    pub metadata: Value,
}

impl IndexMatch {
    /// Returns the `text` metadata passage, if present and a string.
    pub fn text(&self) -> Option<&str> {
        self.metadata.get("text").and_then(Value::as_str)
    }
}
