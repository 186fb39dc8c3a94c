//! Student backend capability.
//!
//! Defines the operations every data source of the portal offers. The
//! institutional HTTP service and the local demo service both implement it,
//! which lets the gateway pick one by mode and lets tests inject fakes.

use crate::credentials::Credentials;
use crate::error::Result;
use crate::mode::ApiMode;
use crate::profile::Profile;
use crate::program::Program;
use crate::token::SessionToken;
use serde::{Deserialize, Serialize};

/// Minimal account record returned alongside a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Result of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: SessionToken,
    pub user: Option<UserSummary>,
}

/// A source of catalog, authentication and profile data.
#[async_trait::async_trait]
pub trait StudentBackend: Send + Sync {
    /// The mode this backend serves.
    fn kind(&self) -> ApiMode;

    /// Retrieves the program catalog.
    async fn list_programs(&self) -> Result<Vec<Program>>;

    /// Exchanges credentials for a session token.
    ///
    /// Credentials are already validated by the caller.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthGrant>;

    /// Retrieves the profile of the student owning `token`.
    async fn fetch_profile(&self, token: &SessionToken) -> Result<Profile>;
}
