use serde::Deserialize;

/// Form payload for `POST /`.
#[derive(Debug, Deserialize)]
pub struct AskForm {
    /// The user's question; required, otherwise unconstrained.
    pub query: String,
}
