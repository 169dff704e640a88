//! The session store: single source of truth for "who is logged in and
//! with what token".
//!
//! State is published through a `tokio::sync::watch` channel so consumers
//! (navigation, views) re-evaluate the access guard on every change
//! instead of polling ambient globals. Mutation happens only through
//! [`SessionStore::login`], [`SessionStore::logout`], and the startup
//! [`SessionStore::restore`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;

use campus_core::guard;
use campus_core::nav::{self, Destination};
use campus_core::roles::Role;
use campus_core::session::Session;

use crate::backend::{AuthTokens, Backend};
use crate::error::ClientError;
use crate::persist::{CredentialStore, StoredCredentials};

/// Observable session state.
///
/// Starts as `Unknown` until [`SessionStore::restore`] resolves; after
/// that it is always `SignedOut` or `SignedIn` -- never a partially
/// populated session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Restoration has not completed yet.
    Unknown,
    /// No authenticated session.
    SignedOut,
    /// An authenticated session with profile and token.
    SignedIn(Session),
}

impl SessionState {
    /// The live session, if signed in.
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::SignedIn(session) => Some(session),
            _ => None,
        }
    }
}

/// Owns the client's authentication state.
pub struct SessionStore {
    backend: Arc<dyn Backend>,
    store: Arc<dyn CredentialStore>,
    state_tx: watch::Sender<SessionState>,
    /// Bumped by login/logout so an in-flight restore that resolves late
    /// discards its result instead of clobbering newer state.
    generation: AtomicU64,
}

impl SessionStore {
    /// Create a store in the `Unknown` state. Call
    /// [`restore`](Self::restore) once at startup to resolve it.
    pub fn new(backend: Arc<dyn Backend>, store: Arc<dyn CredentialStore>) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Unknown);
        Self {
            backend,
            store,
            state_tx,
            generation: AtomicU64::new(0),
        }
    }

    /// Subscribe to session-state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.state_tx.borrow().clone()
    }

    /// The live session, if signed in.
    pub fn session(&self) -> Option<Session> {
        self.current().session().cloned()
    }

    /// Evaluate the access guard for the current state.
    pub fn allowed(&self, required: &[Role]) -> bool {
        guard::allow(self.current().session(), required)
    }

    /// Resolve a navigation attempt against the route table and the
    /// current state.
    pub fn resolve(&self, path: &str) -> Destination {
        nav::resolve(path, self.current().session())
    }

    /// Attempt to recover a previously persisted session.
    ///
    /// Loads the stored token pair, validates the access token against the
    /// backend, and falls back to one refresh attempt. Any failure leaves
    /// the state `SignedOut` (and clears the stale credentials) -- never a
    /// partial session. A login or logout racing this call wins: the late
    /// restore result is discarded.
    pub async fn restore(&self) {
        let generation = self.generation.load(Ordering::SeqCst);

        let Some(credentials) = self.store.load() else {
            self.publish(generation, SessionState::SignedOut);
            return;
        };

        match self.validate_credentials(credentials).await {
            Ok((profile, tokens)) => {
                if !profile.invariant_holds() {
                    tracing::warn!(user_id = profile.id, "Restored profile violates the approval invariant; signing out");
                    self.clear_persisted();
                    self.publish(generation, SessionState::SignedOut);
                    return;
                }
                let session = Session {
                    profile,
                    token: tokens.token.clone(),
                };
                // Discard if a login/logout happened while we were away.
                if self.generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!("Discarding stale session restore");
                    return;
                }
                if let Err(e) = self.store.save(&tokens) {
                    tracing::warn!(error = %e, "Failed to persist restored credentials");
                }
                self.backend.set_bearer(Some(session.token.clone()));
                self.publish(generation, SessionState::SignedIn(session));
            }
            Err(e) => {
                tracing::debug!(error = %e, "Session restore failed");
                self.clear_persisted();
                self.publish(generation, SessionState::SignedOut);
            }
        }
    }

    /// Exchange credentials for a session and record it.
    ///
    /// On success the profile and token become current state, are persisted
    /// for later restoration, and the bearer credential is attached to
    /// subsequent backend requests. An unapproved account surfaces as
    /// [`ClientError::ApprovalPending`] so the login view can render an
    /// "awaiting approval" message instead of "invalid credentials".
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let tokens = self.backend.login(email, password).await?;
        Ok(self.install(tokens))
    }

    /// Sign out.
    ///
    /// Remote invalidation is best-effort: local state and persisted
    /// credentials are cleared even when the backend call fails.
    pub async fn logout(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);

        if let SessionState::SignedIn(session) = self.current() {
            if let Err(e) = self.backend.invalidate(&session.token).await {
                tracing::warn!(error = %e, "Remote session invalidation failed; clearing locally anyway");
            }
        }

        self.backend.set_bearer(None);
        self.clear_persisted();
        let _ = self.state_tx.send(SessionState::SignedOut);
    }

    /// Record a fresh token pair as the current session.
    fn install(&self, tokens: AuthTokens) -> Session {
        self.generation.fetch_add(1, Ordering::SeqCst);

        let session = Session {
            profile: tokens.profile.clone(),
            token: tokens.access_token.clone(),
        };

        if let Err(e) = self.store.save(&StoredCredentials {
            token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token,
        }) {
            tracing::warn!(error = %e, "Failed to persist session credentials");
        }

        self.backend.set_bearer(Some(tokens.access_token));
        let _ = self.state_tx.send(SessionState::SignedIn(session.clone()));
        session
    }

    /// Validate a stored token pair: profile fetch first, one refresh
    /// attempt if the access token is no longer accepted.
    async fn validate_credentials(
        &self,
        credentials: StoredCredentials,
    ) -> Result<(campus_core::profile::Profile, StoredCredentials), ClientError> {
        match self.backend.fetch_profile(&credentials.token).await {
            Ok(profile) => Ok((profile, credentials)),
            Err(ClientError::Unauthorized(_)) => {
                let tokens = self.backend.refresh(&credentials.refresh_token).await?;
                Ok((
                    tokens.profile,
                    StoredCredentials {
                        token: tokens.access_token,
                        refresh_token: tokens.refresh_token,
                    },
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Publish `state` unless a newer login/logout superseded `generation`.
    fn publish(&self, generation: u64, state: SessionState) {
        if self.generation.load(Ordering::SeqCst) == generation {
            let _ = self.state_tx.send(state);
        }
    }

    fn clear_persisted(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to clear persisted credentials");
        }
    }
}
