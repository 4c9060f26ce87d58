//! In-process session store backed by a locked hash map.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

use purgehub_domain::id::UserId;

use crate::ports::SessionStore;

/// Sessions kept in memory; they do not survive a restart.
///
/// Each session expires `ttl` after it was opened. Expired entries are
/// dropped lazily on lookup and swept whenever a new session opens.
pub struct InMemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<String, Entry>>,
}

struct Entry {
    user_id: UserId,
    expires_at: Instant,
}

impl InMemorySessionStore {
    /// Create an empty store whose sessions live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no session at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for InMemorySessionStore {
    fn open(&self, user_id: UserId) -> String {
        let token = uuid::Uuid::new_v4().simple().to_string();
        let now = Instant::now();
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, entry| entry.expires_at > now);
        sessions.insert(
            token.clone(),
            Entry {
                user_id,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    fn resolve(&self, token: &str) -> Option<UserId> {
        let now = Instant::now();
        {
            let sessions = self
                .sessions
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            match sessions.get(token) {
                Some(entry) if entry.expires_at > now => return Some(entry.user_id),
                Some(_) => {}
                None => return None,
            }
        }
        self.close(token);
        None
    }

    fn close(&self, token: &str) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_open_session_to_its_user() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let token = store.open(UserId::new(1));
        assert_eq!(store.resolve(&token), Some(UserId::new(1)));
    }

    #[test]
    fn should_issue_distinct_tokens() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let a = store.open(UserId::new(1));
        let b = store.open(UserId::new(1));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn should_forget_closed_session() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        let token = store.open(UserId::new(1));
        store.close(&token);
        assert_eq!(store.resolve(&token), None);
        assert!(store.is_empty());
    }

    #[test]
    fn should_reject_unknown_token() {
        let store = InMemorySessionStore::new(Duration::from_secs(60));
        assert_eq!(store.resolve("nope"), None);
    }

    #[test]
    fn should_expire_sessions_after_ttl() {
        let store = InMemorySessionStore::new(Duration::ZERO);
        let token = store.open(UserId::new(1));
        assert_eq!(store.resolve(&token), None);
        assert!(store.is_empty());
    }
}
