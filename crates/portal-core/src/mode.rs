//! Backend selection mode.

use crate::error::PortalError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which backend the next gateway call will prefer.
///
/// The flag starts at [`ApiMode::Real`]. Failures of the remote backend move
/// it to [`ApiMode::Mock`]; only an explicit override moves it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiMode {
    /// The institutional backend over HTTP.
    #[default]
    Real,
    /// The local demo backend.
    Mock,
}

impl ApiMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMode::Real => "real",
            ApiMode::Mock => "mock",
        }
    }

    /// Human-facing label used by front ends.
    pub fn label(&self) -> &'static str {
        match self {
            ApiMode::Real => "REAL API",
            ApiMode::Mock => "DEMO",
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, ApiMode::Mock)
    }
}

impl fmt::Display for ApiMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiMode {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Ok(ApiMode::Real),
            "mock" | "demo" => Ok(ApiMode::Mock),
            other => Err(PortalError::config(format!(
                "Unknown API mode '{other}' (expected 'real' or 'mock')"
            ))),
        }
    }
}

/// Decides which backend subsequent calls prefer after `error` was observed
/// while running in `previous` mode.
///
/// Transport and protocol failures select the demo backend. Every other
/// error (validation, rejected credentials, local storage) leaves the mode
/// untouched, so this never moves the flag from `Mock` back to `Real`.
pub fn decide_source(previous: ApiMode, error: &PortalError) -> ApiMode {
    if error.is_fallback_trigger() {
        ApiMode::Mock
    } else {
        previous
    }
}
