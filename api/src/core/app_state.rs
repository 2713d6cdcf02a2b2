use std::sync::Arc;

use ai_llm_service::{
    LlmServiceProfiles,
    config::default_config::{config_embedding, config_generation},
};
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use contextor::{AskOptions, Contextor};
use rag_store::{RagConfig, Retriever};
use tracing::info;

use crate::{
    core::{app_config::ApiConfig, render::PageRenderer, session::SessionStore},
    error_handler::AppError,
};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Retrieve-then-generate pipeline.
    pub contextor: Arc<Contextor>,
    /// Chat histories by session.
    pub sessions: SessionStore,
    pub renderer: Arc<PageRenderer>,
    /// Cookie signing key, generated per process.
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

impl AppState {
    /// Builds state around an already wired pipeline with a fresh signing key.
    pub fn new(contextor: Contextor, cfg: &ApiConfig) -> Result<Self, AppError> {
        Ok(Self {
            contextor: Arc::new(contextor),
            sessions: SessionStore::new(cfg.history_max_turns),
            renderer: Arc::new(PageRenderer::new()?),
            cookie_key: Key::generate(),
        })
    }

    /// Wires model clients and the vector index from the environment.
    ///
    /// Malformed settings fail here; missing API keys fail on the first request.
    pub fn from_env(cfg: &ApiConfig) -> Result<Self, AppError> {
        let svc = Arc::new(LlmServiceProfiles::new(config_generation()?, config_embedding()?)?);
        let (generation, embedding) = svc.profiles();
        info!(
            generation = %format!("{}/{}", generation.provider, generation.model),
            embedding = %format!("{}/{}", embedding.provider, embedding.model),
            "model profiles loaded"
        );

        let rag_cfg = RagConfig::from_env()?;
        let retriever = Retriever::from_config(&rag_cfg, svc.clone())?;
        let contextor = Contextor::with_opts(
            retriever,
            svc,
            AskOptions {
                top_k: rag_cfg.top_k,
            },
        );

        Self::new(contextor, cfg)
    }
}
