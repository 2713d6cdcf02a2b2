use std::time::Duration;

use crate::{
    config::llm_model_config::LlmModelConfig,
    error_handler::{Result, validate_http_endpoint},
};

pub mod gemini_service;
pub mod ollama_service;

/// Builds the shared `reqwest` client for one provider config.
///
/// Without `timeout_secs` no overall timeout is set, so a slow upstream stalls
/// only the request that is waiting on it.
pub(crate) fn build_http_client(
    cfg: &LlmModelConfig,
    endpoint_var: &'static str,
) -> Result<reqwest::Client> {
    validate_http_endpoint(endpoint_var, cfg.endpoint.trim())?;

    let mut builder = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true);
    if let Some(secs) = cfg.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}
