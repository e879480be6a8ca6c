//! Session state: the client-held evidence that a user is authenticated.
//!
//! The [`Session`] type enforces the core invariant that a cached user
//! profile is only meaningful while a token is present. [`SessionHub`] is the
//! in-memory broadcaster that mirrors the durable [`CredentialStore`] and
//! notifies subscribed surfaces on login/logout, including changes made by
//! other client instances sharing the same store.

use crate::error::Result;
use crate::user::UserAccount;
use std::sync::Arc;
use tokio::sync::watch;

/// A snapshot of the client's authentication state.
///
/// Invariant: a user profile is never held without its token, so `user()`
/// can never return stale profile data for an absent token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserAccount>,
}

impl Session {
    /// The logged-out session.
    pub fn absent() -> Self {
        Self {
            token: None,
            user: None,
        }
    }

    /// A logged-in session holding both parts together.
    pub fn authenticated(token: impl Into<String>, user: UserAccount) -> Self {
        Self {
            token: Some(token.into()),
            user: Some(user),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    /// Authentication is token presence, nothing else.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::absent()
    }
}

/// Durable storage for the session, shared by every client instance.
///
/// `read()` is infallible by contract: any storage failure yields the absent
/// session, because "no session" is the safe default for callers deciding
/// whether to attach credentials.
pub trait CredentialStore: Send + Sync {
    /// Persists both parts of the session together.
    fn save(&self, token: &str, user: &UserAccount) -> Result<()>;

    /// Removes both parts together. Clearing an absent session is a no-op.
    fn clear(&self) -> Result<()>;

    /// Synchronous snapshot of the stored session.
    fn read(&self) -> Session;
}

/// In-memory session state that writes through to a [`CredentialStore`] and
/// broadcasts every transition to subscribed surfaces.
pub struct SessionHub {
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<Session>,
}

impl SessionHub {
    /// Builds the hub by reading the store, so a session persisted by a
    /// previous run is live immediately.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let initial = store.read();
        let (state, _) = watch::channel(initial);
        Self { store, state }
    }

    /// Current in-memory session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Fresh token snapshot straight from the store, taken before each
    /// dispatch so concurrent instances see each other's logouts even
    /// between watcher ticks.
    pub fn current_token(&self) -> Option<String> {
        self.store.read().token().map(str::to_owned)
    }

    /// Subscribes a surface to session transitions.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Writes the session through to the store, then updates in-memory state
    /// synchronously.
    pub fn login(&self, token: impl Into<String>, user: UserAccount) -> Result<()> {
        let token = token.into();
        self.store.save(&token, &user)?;
        let session = Session::authenticated(token, user);
        // No email or token in logs.
        tracing::info!(target: "session", "Logged in");
        self.state.send_replace(session);
        Ok(())
    }

    /// Clears the store and resets state. The caller is responsible for
    /// leaving authenticated-only views afterwards.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!(target: "session", "Logged out");
        self.state.send_replace(Session::absent());
        Ok(())
    }

    /// The 401 path: drop the session without failing on storage errors, so
    /// an authentication failure always converges on logged-out state.
    pub fn invalidate(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(target: "session", "Failed to clear credentials on invalidation: {}", e);
        }
        tracing::warn!(target: "session", "Session invalidated by the server");
        self.state.send_replace(Session::absent());
    }

    /// Re-reads the store and broadcasts the stored session when it differs
    /// from the in-memory one. Returns true when a transition was applied.
    ///
    /// This is the convergence primitive: another instance writing or
    /// clearing the shared store is observed here, without any API traffic.
    pub fn resync(&self) -> bool {
        let stored = self.store.read();
        if stored != *self.state.borrow() {
            tracing::debug!(target: "session", "External credential change detected, resyncing");
            self.state.send_replace(stored);
            true
        } else {
            false
        }
    }
}
