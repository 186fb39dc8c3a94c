//! Path management for portal configuration and session files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/campus-portal/     # Config directory (platform dependent)
//! ├── config.toml              # Client configuration
//! └── session.json             # Current session token
//! ```

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "campus-portal";
const CONFIG_FILE_NAME: &str = "config.toml";
const SESSION_FILE_NAME: &str = "session.json";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot determine the config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for portal_core::PortalError {
    fn from(err: PathError) -> Self {
        portal_core::PortalError::config(err.to_string())
    }
}

/// Resolves where the portal keeps its files.
///
/// With no base path the platform config directory is used
/// (`dirs::config_dir()/campus-portal`). A base path replaces that
/// directory entirely, which tests and `--config-dir` rely on.
#[derive(Debug, Clone, Default)]
pub struct PortalPaths {
    base: Option<PathBuf>,
}

impl PortalPaths {
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the portal configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to the session token file.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer credential; it is written with mode 600 on Unix.
    pub fn session_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(SESSION_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_dir() {
        let paths = PortalPaths::default();
        if let Ok(dir) = paths.config_dir() {
            assert!(dir.ends_with("campus-portal"));
        }
    }

    #[test]
    fn test_files_live_under_base() {
        let base = Path::new("/tmp/portal-test");
        let paths = PortalPaths::new(Some(base));
        assert_eq!(paths.config_dir().unwrap(), base);
        assert_eq!(paths.config_file().unwrap(), base.join("config.toml"));
        assert_eq!(paths.session_file().unwrap(), base.join("session.json"));
    }
}
