//! `GET /` and `POST /`: the chat page.

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    response::Html,
};
use axum_extra::extract::cookie::SignedCookieJar;
use contextor::QaAnswer;
use tracing::{debug, info, instrument};

use crate::{
    core::{
        app_state::AppState,
        session::{Turn, ensure_session, session_id},
    },
    error_handler::AppResult,
    routes::chat::chat_request::AskForm,
};

/// Handler: GET /
///
/// Renders the form and the caller's history without touching it.
pub async fn chat_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> AppResult<Html<String>> {
    let history = match session_id(&jar) {
        Some(id) => state.sessions.history(&id).await,
        None => Vec::new(),
    };
    debug!(turns = history.len(), "chat_page: render");

    Ok(Html(state.renderer.render_page(&history)?))
}

/// Handler: POST /
///
/// Answers the submitted question, records the turn and renders the full
/// history. A failure anywhere before the append leaves the history unchanged.
///
/// # Example
/// ```bash
/// curl -c jar -b jar -X POST http://127.0.0.1:8080/ \
///   --data-urlencode 'query=What is the return policy?'
/// ```
#[instrument(skip_all)]
pub async fn ask_question(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    form: Result<Form<AskForm>, FormRejection>,
) -> AppResult<(SignedCookieJar, Html<String>)> {
    let Form(AskForm { query }) = form?;
    let (jar, sid) = ensure_session(jar);

    let QaAnswer { answer, .. } = state.contextor.ask(&query).await?;

    let history = state
        .sessions
        .append(
            sid,
            Turn {
                query,
                response: answer,
            },
        )
        .await;
    info!(session = %sid, turns = history.len(), "ask_question: turn recorded");

    let page = state.renderer.render_page(&history)?;
    Ok((jar, Html(page)))
}
