//! Per-browser-session chat history.
//!
//! The browser holds only a signed cookie with a random session id; turns live
//! in process memory and are lost on restart, together with the signing key.

use std::{collections::HashMap, sync::Arc};

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session";

/// One question and the answer received for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub query: String,
    pub response: String,
}

/// In-memory histories keyed by session id.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Vec<Turn>>>>,
    /// Oldest turns are evicted beyond this; `None` keeps everything.
    max_turns: Option<usize>,
}

impl SessionStore {
    pub fn new(max_turns: Option<usize>) -> Self {
        Self {
            inner: Arc::default(),
            max_turns,
        }
    }

    /// Snapshot of a session's turns, oldest first; empty for unknown ids.
    pub async fn history(&self, id: &Uuid) -> Vec<Turn> {
        self.inner.read().await.get(id).cloned().unwrap_or_default()
    }

    /// Appends `turn` and returns the updated history.
    pub async fn append(&self, id: Uuid, turn: Turn) -> Vec<Turn> {
        let mut map = self.inner.write().await;
        let turns = map.entry(id).or_default();
        turns.push(turn);

        if let Some(max) = self.max_turns {
            if turns.len() > max {
                let excess = turns.len() - max;
                turns.drain(..excess);
                debug!(session = %id, evicted = excess, "history cap reached");
            }
        }

        turns.clone()
    }
}

/// Session id from a verified cookie; tampered or foreign cookies read as none.
pub fn session_id(jar: &SignedCookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
}

/// Returns the jar's session id, issuing a fresh signed cookie when missing.
pub fn ensure_session(jar: SignedCookieJar) -> (SignedCookieJar, Uuid) {
    if let Some(id) = session_id(&jar) {
        return (jar, id);
    }

    let id = Uuid::new_v4();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    debug!(session = %id, "new session");
    (jar.add(cookie), id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    fn turn(n: usize) -> Turn {
        Turn {
            query: format!("q{n}"),
            response: format!("a{n}"),
        }
    }

    #[tokio::test]
    async fn append_keeps_submission_order() {
        let store = SessionStore::default();
        let id = Uuid::new_v4();
        for n in 0..3 {
            store.append(id, turn(n)).await;
        }
        assert_eq!(store.history(&id).await, vec![turn(0), turn(1), turn(2)]);
        assert!(store.history(&Uuid::new_v4()).await.is_empty());
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = SessionStore::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        store.append(a, turn(1)).await;
        store.append(b, turn(2)).await;
        assert_eq!(store.history(&a).await, vec![turn(1)]);
        assert_eq!(store.history(&b).await, vec![turn(2)]);
    }

    #[tokio::test]
    async fn cap_evicts_oldest_turns() {
        let store = SessionStore::new(Some(2));
        let id = Uuid::new_v4();
        for n in 0..4 {
            store.append(id, turn(n)).await;
        }
        assert_eq!(store.history(&id).await, vec![turn(2), turn(3)]);
    }

    #[test]
    fn ensure_session_reuses_existing_id() {
        let jar = SignedCookieJar::new(Key::generate());
        let (jar, first) = ensure_session(jar);
        let (_, second) = ensure_session(jar);
        assert_eq!(first, second);
    }
}
