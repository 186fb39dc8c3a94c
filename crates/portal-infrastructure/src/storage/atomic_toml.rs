//! Typed TOML file with atomic saves and locked read-modify-write updates.

use super::atomic::{FileLock, write_atomic};
use portal_core::PortalError;
use serde::{Serialize, de::DeserializeOwned};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic TOML operations.
#[derive(Debug)]
pub enum AtomicTomlError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parse error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
    /// The update callback rejected the change.
    Rejected(PortalError),
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::LockError(e) => write!(f, "Lock error: {}", e),
            AtomicTomlError::Rejected(e) => write!(f, "Update rejected: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::TomlSerError(e)
    }
}

impl From<AtomicTomlError> for PortalError {
    fn from(err: AtomicTomlError) -> Self {
        match err {
            AtomicTomlError::IoError(e) => e.into(),
            AtomicTomlError::TomlError(e) => e.into(),
            AtomicTomlError::TomlSerError(e) => e.into(),
            AtomicTomlError::LockError(message) => PortalError::io(message),
            AtomicTomlError::Rejected(e) => e,
        }
    }
}

/// A handle to a TOML file holding one `T`.
///
/// - Saves go through a tmp file, fsync and rename, so readers never see a
///   half-written file.
/// - `update` holds an exclusive lock across load, modify and save.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(toml::from_str(&content)?))
    }

    /// Serializes and saves `data` atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        let toml_string = toml::to_string_pretty(data)?;
        write_atomic(&self.path, toml_string.as_bytes(), false)?;
        Ok(())
    }

    /// Loads the current value (or `default_value`), applies `f`, and saves
    /// the result while holding the file lock. Nothing is written if `f`
    /// fails.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<T, AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<(), PortalError>,
    {
        let _lock = FileLock::acquire(&self.path)
            .map_err(|e| AtomicTomlError::LockError(format!("Failed to acquire lock: {}", e)))?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data).map_err(AtomicTomlError::Rejected)?;
        self.save(&data)?;

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Settings {
        url: String,
        retries: u32,
    }

    fn defaults() -> Settings {
        Settings {
            url: "http://localhost".to_string(),
            retries: 0,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Settings>::new(temp_dir.path().join("settings.toml"));

        file.save(&defaults()).unwrap();

        assert_eq!(file.load().unwrap(), Some(defaults()));
    }

    #[test]
    fn test_load_missing_or_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        let file = AtomicTomlFile::<Settings>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_applies_and_persists() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Settings>::new(temp_dir.path().join("settings.toml"));

        let updated = file
            .update(defaults(), |s| {
                s.retries += 2;
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.retries, 2);

        file.update(defaults(), |s| {
            s.retries += 3;
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().retries, 5);
    }

    #[test]
    fn test_rejected_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        let file = AtomicTomlFile::<Settings>::new(path.clone());

        let err = file
            .update(defaults(), |_| Err(PortalError::config("nope")))
            .unwrap_err();

        assert!(matches!(err, AtomicTomlError::Rejected(_)));
        assert!(!path.exists());
        assert_eq!(PortalError::from(err), PortalError::config("nope"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.toml");
        fs::write(&path, "url = ").unwrap();

        let file = AtomicTomlFile::<Settings>::new(path);
        assert!(matches!(file.load(), Err(AtomicTomlError::TomlError(_))));
    }
}
