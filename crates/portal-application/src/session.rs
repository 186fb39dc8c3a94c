//! Session use case: login, logout and the authenticated profile view.

use crate::gateway::ApiGateway;
use portal_core::{
    ApiMode, AuthGrant, Credentials, PortalConfig, PortalError, Profile, Program, Result,
    SessionToken, TokenStore,
};
use portal_infrastructure::{FileTokenStore, MemoryTokenStore, PortalPaths};
use std::sync::Arc;

/// Use case for one student's session.
///
/// Owns the gateway and the token store. The token is written only after a
/// successful login and removed on logout or when the backend reports that
/// the stored session is no longer valid.
pub struct PortalSession {
    gateway: Arc<ApiGateway>,
    tokens: Arc<dyn TokenStore>,
}

impl PortalSession {
    pub fn new(gateway: Arc<ApiGateway>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { gateway, tokens }
    }

    /// Wires the default gateway and a token store.
    ///
    /// With `ephemeral` the token lives in memory only; otherwise it is kept
    /// in the session file under `paths`.
    pub fn from_config(config: &PortalConfig, paths: &PortalPaths, ephemeral: bool) -> Result<Self> {
        let gateway = Arc::new(ApiGateway::from_config(config)?);
        let tokens: Arc<dyn TokenStore> = if ephemeral {
            Arc::new(MemoryTokenStore::new())
        } else {
            Arc::new(FileTokenStore::new(paths)?)
        };
        Ok(Self::new(gateway, tokens))
    }

    pub fn gateway(&self) -> &Arc<ApiGateway> {
        &self.gateway
    }

    pub async fn mode(&self) -> ApiMode {
        self.gateway.mode().await
    }

    pub async fn set_mode(&self, mode: ApiMode) {
        self.gateway.set_mode(mode).await;
    }

    pub async fn programs(&self) -> Result<Vec<Program>> {
        self.gateway.list_programs().await
    }

    /// Authenticates and stores the issued token.
    ///
    /// A previously stored token is left untouched when the login fails.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthGrant> {
        let grant = self.gateway.authenticate(credentials).await?;
        self.tokens.set(&grant.token)?;
        tracing::info!(
            origin = ?grant.token.origin(),
            token = %grant.token.redacted(),
            "Session token stored"
        );
        Ok(grant)
    }

    pub fn logout(&self) -> Result<()> {
        self.tokens.clear()?;
        tracing::info!("Session token cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.exists()
    }

    /// The stored token, if any.
    ///
    /// An unreadable session file is discarded and reported as
    /// [`PortalError::NotAuthenticated`].
    pub fn current_token(&self) -> Result<SessionToken> {
        match self.tokens.get() {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(PortalError::NotAuthenticated),
            Err(err @ PortalError::Serialization { .. }) => {
                tracing::warn!(error = %err, "Discarding unreadable session token");
                self.tokens.clear()?;
                Err(PortalError::NotAuthenticated)
            }
            Err(err) => Err(err),
        }
    }

    /// Loads the profile for the stored token.
    pub async fn current_profile(&self) -> Result<Profile> {
        let token = self.current_token()?;
        match self.gateway.fetch_profile(&token).await {
            Ok(profile) => Ok(profile),
            Err(err) if err.invalidates_session() => {
                tracing::warn!(error = %err, "Stored session rejected, clearing token");
                self.tokens.clear()?;
                Err(err)
            }
            Err(err) => Err(err),
        }
    }
}
