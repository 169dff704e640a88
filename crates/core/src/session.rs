//! The client-side authentication session.

use serde::{Deserialize, Serialize};

use crate::profile::Profile;

/// The live authentication state of a signed-in client.
///
/// A session always holds both the profile and the credential token;
/// "signed out" is represented by the absence of a `Session`, never by a
/// half-filled one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub profile: Profile,
    pub token: String,
}
