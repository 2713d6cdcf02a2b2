use crate::config::llm_provider::LlmProvider;

/// Configuration for an LLM model invocation.
///
/// - `provider`: which backend serves the model.
/// - `model`: model identifier (e.g. `"gemini-1.5-flash"`, `"all-minilm"`).
/// - `endpoint`: API base URL (Gemini: `.../v1beta`, Ollama: `http://host:11434`).
/// - `api_key`: credential for hosted providers. May be `None` at startup;
///   calls that need it fail then.
/// - `max_tokens`, `temperature`, `top_p`: optional sampling knobs.
/// - `timeout_secs`: optional client timeout; `None` keeps reqwest's default.
///
/// `Debug` is hand-written so the key never lands in logs.
#[derive(Clone, PartialEq)]
pub struct LlmModelConfig {
    pub provider: LlmProvider,
    pub model: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for LlmModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmModelConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
