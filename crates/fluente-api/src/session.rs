// Session context
//
// Holds the bearer token and the logged-in user for one backend
// connection. This is an explicit object passed to `ApiClient` -- there is
// no process-wide singleton, so tests can run multiple isolated sessions.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// The account returned by the login and `auth/me` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

/// Mutable per-connection authentication state.
///
/// Cheaply cloneable; all clones observe the same token. Created empty,
/// populated by [`ApiClient::login`](crate::ApiClient::login) or seeded
/// from stored credentials via [`Session::with_token`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<SessionInner>,
}

#[derive(Debug, Default)]
struct SessionInner {
    token: RwLock<Option<SecretString>>,
    user: RwLock<Option<AuthenticatedUser>>,
}

impl Session {
    /// A fresh, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with a previously issued token.
    pub fn with_token(token: SecretString) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .token
            .read()
            .expect("session token lock poisoned")
            .is_some()
    }

    /// The logged-in user, if known.
    pub fn user(&self) -> Option<AuthenticatedUser> {
        self.inner
            .user
            .read()
            .expect("session user lock poisoned")
            .clone()
    }

    /// The `Authorization` header value, if a token is held.
    pub(crate) fn bearer_header(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .expect("session token lock poisoned")
            .as_ref()
            .map(|token| format!("Bearer {}", token.expose_secret()))
    }

    /// Replace the access token (login, refresh).
    pub(crate) fn set_token(&self, token: SecretString) {
        *self
            .inner
            .token
            .write()
            .expect("session token lock poisoned") = Some(token);
    }

    /// Record the authenticated user alongside the token.
    pub(crate) fn set_user(&self, user: AuthenticatedUser) {
        *self.inner.user.write().expect("session user lock poisoned") = Some(user);
    }

    /// Drop token and user (logout, failed refresh).
    pub fn clear(&self) {
        *self
            .inner
            .token
            .write()
            .expect("session token lock poisoned") = None;
        *self.inner.user.write().expect("session user lock poisoned") = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_unauthenticated() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert!(session.bearer_header().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn clones_share_state() {
        let session = Session::new();
        let other = session.clone();

        session.set_token(SecretString::from("tok-123".to_owned()));
        assert!(other.is_authenticated());
        assert_eq!(other.bearer_header().unwrap(), "Bearer tok-123");

        other.clear();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn with_token_seeds_authentication() {
        let session = Session::with_token(SecretString::from("seed".to_owned()));
        assert!(session.is_authenticated());
        assert_eq!(session.bearer_header().unwrap(), "Bearer seed");
    }
}
