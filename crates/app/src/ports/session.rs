//! Session port: maps opaque browser tokens to logged-in users.

use purgehub_domain::id::UserId;

/// Keeps track of authenticated browser sessions.
///
/// Tokens are opaque strings handed to the browser in a cookie. Lookups are
/// synchronous; implementations must not block on IO.
pub trait SessionStore {
    /// Open a session for `user_id` and return its token.
    fn open(&self, user_id: UserId) -> String;

    /// Resolve a token to its user, if the session exists and is still live.
    fn resolve(&self, token: &str) -> Option<UserId>;

    /// Forget a session. Unknown tokens are ignored.
    fn close(&self, token: &str);
}

impl<T: SessionStore> SessionStore for std::sync::Arc<T> {
    fn open(&self, user_id: UserId) -> String {
        (**self).open(user_id)
    }

    fn resolve(&self, token: &str) -> Option<UserId> {
        (**self).resolve(token)
    }

    fn close(&self, token: &str) {
        (**self).close(token);
    }
}
