//! Campus native client.
//!
//! The client-side core of the platform: a [`SessionStore`] holding the
//! authenticated user and token, a [`Backend`] trait describing the remote
//! collaborator (with a reqwest implementation in [`http`]), and a
//! persisted [`CredentialStore`] so a restart can restore the session.
//!
//! Access decisions come from `campus_core::guard` and the static route
//! tables in `campus_core::nav`; the store re-publishes session state on
//! every change so consumers re-evaluate them reactively.
//!
//! [`SessionStore`]: session::SessionStore
//! [`Backend`]: backend::Backend
//! [`CredentialStore`]: persist::CredentialStore

pub mod backend;
pub mod error;
pub mod http;
pub mod persist;
pub mod session;
pub mod wire;

pub use backend::{AuthTokens, Backend};
pub use error::ClientError;
pub use http::HttpBackend;
pub use persist::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use session::{SessionState, SessionStore};
