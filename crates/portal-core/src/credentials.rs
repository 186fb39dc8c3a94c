//! Login credentials.

use crate::error::{PortalError, Result};
use std::fmt;

/// Credentials for one authentication attempt. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Selected program; `None` means nothing was selected.
    pub program_id: Option<i64>,
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(program_id: i64, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            program_id: Some(program_id),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Builds credentials from raw form input.
    ///
    /// An empty program field means no program was selected, which is left
    /// for [`Credentials::validate`] to report. A non-numeric program field is
    /// rejected here.
    pub fn from_form(
        program_id: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let program_id = program_id.trim();
        let program_id = if program_id.is_empty() {
            None
        } else {
            Some(program_id.parse::<i64>().map_err(|_| {
                PortalError::validation(format!("Invalid program id '{program_id}'"))
            })?)
        };

        Ok(Self {
            program_id,
            username: username.into(),
            password: password.into(),
        })
    }

    /// Checks the local preconditions for a login attempt.
    pub fn validate(&self) -> Result<()> {
        if self.program_id.is_none() {
            return Err(PortalError::validation("Please select a program"));
        }
        if self.login_name().is_empty() || self.password.is_empty() {
            return Err(PortalError::validation(
                "Please enter both username and password",
            ));
        }
        Ok(())
    }

    /// Username as submitted to a backend.
    pub fn login_name(&self) -> &str {
        self.username.trim()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("program_id", &self.program_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_credentials() {
        let credentials = Credentials::new(1, "minhaj", "12345");
        assert!(credentials.validate().is_ok());
    }

    #[test]
    fn test_empty_program_is_validation_error() {
        let credentials = Credentials::from_form("", "a", "b").unwrap();
        assert_eq!(credentials.program_id, None);
        let err = credentials.validate().unwrap_err();
        assert_eq!(err, PortalError::validation("Please select a program"));
    }

    #[test]
    fn test_non_numeric_program_is_rejected() {
        let err = Credentials::from_form("cse", "a", "b").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_blank_username_or_password() {
        assert!(Credentials::new(1, "   ", "pw").validate().unwrap_err().is_validation());
        assert!(Credentials::new(1, "user", "").validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_login_name_is_trimmed() {
        let credentials = Credentials::from_form(" 1 ", "  minhaj ", "12345").unwrap();
        assert_eq!(credentials.program_id, Some(1));
        assert_eq!(credentials.login_name(), "minhaj");
    }

    #[test]
    fn test_debug_redacts_password() {
        let rendered = format!("{:?}", Credentials::new(1, "minhaj", "12345"));
        assert!(!rendered.contains("12345"));
        assert!(rendered.contains("<redacted>"));
    }
}
