//! The backend collaborator seam used by the session store.
//!
//! The session logic is agnostic to what sits behind this trait -- the
//! shipped implementation is [`HttpBackend`](crate::http::HttpBackend),
//! and tests substitute an in-memory fake.

use async_trait::async_trait;

use campus_core::profile::Profile;
use campus_core::registration::RegistrationRequest;

use crate::error::ClientError;

/// Tokens and profile returned by a successful credential exchange.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub profile: Profile,
}

/// The remote authentication collaborator.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Exchange email + password for tokens and the canonical profile.
    ///
    /// Valid credentials on an unapproved account yield
    /// [`ClientError::ApprovalPending`], distinct from bad credentials.
    async fn login(&self, email: &str, password: &str) -> Result<AuthTokens, ClientError>;

    /// Submit a self-registration. Returns the created (unapproved) profile.
    async fn register(&self, request: &RegistrationRequest) -> Result<Profile, ClientError>;

    /// Fetch the profile belonging to an access token, validating it.
    async fn fetch_profile(&self, access_token: &str) -> Result<Profile, ClientError>;

    /// Exchange a refresh token for a fresh token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens, ClientError>;

    /// Invalidate the server-side session for an access token.
    async fn invalidate(&self, access_token: &str) -> Result<(), ClientError>;

    /// Record the bearer credential to attach to subsequent requests
    /// (`None` detaches it). Called by the session store on login, restore,
    /// and logout.
    fn set_bearer(&self, token: Option<String>);
}
