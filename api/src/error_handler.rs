use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use contextor::ContextorError;
use thiserror::Error;
use tracing::{error, warn};

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    #[error(transparent)]
    Rag(#[from] rag_store::RagError),

    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request ---
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Retrieval or generation failed; the turn is dropped.
    #[error("upstream failure: {0}")]
    Upstream(#[from] ContextorError),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Llm(_) => "LLM_CONFIG_ERROR",
            AppError::Rag(_) => "RAG_CONFIG_ERROR",
            AppError::Template(_) => "TEMPLATE_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Upstream(_) => "UPSTREAM_FAILURE",
            AppError::Render(_) => "RENDER_ERROR",
        }
    }

    /// Text shown to the user. Details stay in the logs.
    fn public_message(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "The form must include a question in the `query` field.",
            _ => "Something went wrong while answering. Please try again.",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            error!(code, error = %self, "request failed");
        } else {
            warn!(code, error = %self, "request rejected");
        }

        let body = format!(
            "<!DOCTYPE html>\n<html>\n  <body>\n    <h2>{} {}</h2>\n    <p>{}</p>\n    <p><a href=\"/\">Back</a></p>\n  </body>\n</html>\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error"),
            self.public_message(),
        );
        (status, Html(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

impl From<FormRejection> for AppError {
    fn from(err: FormRejection) -> Self {
        AppError::BadRequest(err.body_text())
    }
}

impl From<handlebars::TemplateError> for AppError {
    fn from(err: handlebars::TemplateError) -> Self {
        AppError::Template(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upstream_failures_hide_details() {
        let err = AppError::Upstream(ContextorError::Generation("quota for key abc123".into()));
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8_lossy(&bytes);
        assert!(page.contains("500 Internal Server Error"));
        assert!(!page.contains("abc123"));
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = AppError::BadRequest("missing field `query`".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }
}
