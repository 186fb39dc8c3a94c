use crate::error::{PortalError, Result};
use crate::mode::ApiMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://puc.ac.bd:8016/api";
pub const DEFAULT_DEVICE: &str = "web";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

pub const ENV_API_BASE_URL: &str = "PORTAL_API_BASE_URL";
pub const ENV_MODE: &str = "PORTAL_MODE";
pub const ENV_TIMEOUT_SECS: &str = "PORTAL_TIMEOUT_SECS";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PortalConfig {
    pub api_base_url: String,
    /// Device identifier sent with login requests.
    pub device: String,
    pub request_timeout_secs: u64,
    pub initial_mode: ApiMode,
    pub mock: MockSettings,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            device: DEFAULT_DEVICE.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            initial_mode: ApiMode::Real,
            mock: MockSettings::default(),
        }
    }
}

/// Artificial latency of the demo backend, in milliseconds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MockSettings {
    pub catalog_ms: u64,
    pub login_ms: u64,
    pub profile_ms: u64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            catalog_ms: 1000,
            login_ms: 1500,
            profile_ms: 1000,
        }
    }
}

impl PortalConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies `PORTAL_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(mode) = lookup(ENV_MODE) {
            self.initial_mode = mode.parse()?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| {
                PortalError::config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds, got '{secs}'"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(PortalError::config(format!(
                "api_base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(PortalError::config("request_timeout_secs must be greater than 0"));
        }
        if self.device.trim().is_empty() {
            return Err(PortalError::config("device must not be empty"));
        }
        Ok(())
    }

    /// Sets a single field by its `config.toml` key.
    pub fn set_key(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_base_url" => self.api_base_url = value.to_string(),
            "device" => self.device = value.to_string(),
            "request_timeout_secs" => {
                self.request_timeout_secs = value
                    .parse()
                    .map_err(|_| PortalError::config(format!("'{value}' is not a number")))?
            }
            "initial_mode" => self.initial_mode = value.parse()?,
            "mock.catalog_ms" => self.mock.catalog_ms = parse_ms(value)?,
            "mock.login_ms" => self.mock.login_ms = parse_ms(value)?,
            "mock.profile_ms" => self.mock.profile_ms = parse_ms(value)?,
            other => return Err(PortalError::config(format!("Unknown config key '{other}'"))),
        }
        self.validate()
    }
}

fn parse_ms(value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| PortalError::config(format!("'{value}' is not a number of milliseconds")))
}
