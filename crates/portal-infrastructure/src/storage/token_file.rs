//! File-backed session token store.
//!
//! Keeps the current token in `session.json` under the portal config
//! directory so a login survives process restarts.

use super::atomic::{remove_if_exists, write_atomic};
use crate::paths::PortalPaths;
use portal_core::{PortalError, Result, SessionToken, TokenOrigin, TokenStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk shape of `session.json`.
///
/// `origin` is optional so files written without provenance still load;
/// the origin is then inferred from the token contents.
#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<TokenOrigin>,
}

/// Session token persisted as JSON.
///
/// Responsibilities:
/// - Atomic replace on `set` (tmp file + fsync + rename), mode 600 on Unix
/// - Tolerant `clear` (a missing file is already cleared)
///
/// Does NOT:
/// - Validate or refresh tokens
/// - Track expiry
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location (`<config dir>/session.json`).
    pub fn new(paths: &PortalPaths) -> Result<Self> {
        Ok(Self {
            path: paths.session_file()?,
        })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, token: &SessionToken) -> Result<()> {
        let stored = StoredToken {
            token: token.as_str().to_string(),
            origin: Some(token.origin()),
        };
        let json = serde_json::to_vec_pretty(&stored)?;
        write_atomic(&self.path, &json, true)?;
        tracing::debug!(path = %self.path.display(), token = %token.redacted(), "Stored session token");
        Ok(())
    }

    fn get(&self) -> Result<Option<SessionToken>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let stored: StoredToken = serde_json::from_str(&content).map_err(|e| {
            PortalError::Serialization {
                format: "JSON".to_string(),
                message: format!("{} ({})", e, self.path.display()),
            }
        })?;

        if stored.token.is_empty() {
            return Ok(None);
        }

        Ok(Some(match stored.origin {
            Some(origin) => SessionToken::new(stored.token, origin),
            None => SessionToken::from_raw(stored.token),
        }))
    }

    fn clear(&self) -> Result<()> {
        remove_if_exists(&self.path)?;
        tracing::debug!(path = %self.path.display(), "Cleared session token");
        Ok(())
    }
}
