//! Loads and edits `config.toml`.

use crate::paths::PortalPaths;
use crate::storage::AtomicTomlFile;
use portal_core::{PortalConfig, Result};
use std::path::Path;

/// Service for reading and updating the portal configuration.
///
/// Resolution order, lowest to highest priority:
/// 1. Built-in defaults
/// 2. `config.toml`
/// 3. `PORTAL_*` environment variables
///
/// Command-line flags are applied on top by the caller.
pub struct ConfigService {
    file: AtomicTomlFile<PortalConfig>,
}

impl ConfigService {
    pub fn new(paths: &PortalPaths) -> Result<Self> {
        Ok(Self {
            file: AtomicTomlFile::new(paths.config_file()?),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the file only, without environment overrides.
    pub fn load_file(&self) -> Result<PortalConfig> {
        let config = self.file.load()?.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Loads the effective configuration (file plus environment).
    pub fn load(&self) -> Result<PortalConfig> {
        let config = self.load_file()?.with_overrides(|key| std::env::var(key).ok())?;
        tracing::debug!(
            path = %self.file.path().display(),
            base_url = %config.api_base_url,
            mode = %config.initial_mode,
            "Loaded portal configuration"
        );
        Ok(config)
    }

    /// Sets one key in `config.toml` and returns the stored configuration.
    pub fn set(&self, key: &str, value: &str) -> Result<PortalConfig> {
        let updated = self
            .file
            .update(PortalConfig::default(), |config| config.set_key(key, value))?;
        tracing::info!(key, value, "Updated portal configuration");
        Ok(updated)
    }

    /// Writes the defaults if no config file exists yet.
    pub fn ensure_file(&self) -> Result<()> {
        if self.file.load()?.is_none() {
            self.file.save(&PortalConfig::default())?;
        }
        Ok(())
    }
}
