//! In-memory session token store.

use portal_core::{PortalError, Result, SessionToken, TokenStore};
use std::sync::RwLock;

/// Process-local token cell. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SessionToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> PortalError {
    PortalError::internal("token store lock poisoned")
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &SessionToken) -> Result<()> {
        *self.token.write().map_err(poisoned)? = Some(token.clone());
        Ok(())
    }

    fn get(&self) -> Result<Option<SessionToken>> {
        Ok(self.token.read().map_err(poisoned)?.clone())
    }

    fn clear(&self) -> Result<()> {
        *self.token.write().map_err(poisoned)? = None;
        Ok(())
    }
}
