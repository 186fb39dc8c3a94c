//! Session token and its storage contract.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Prefix carried by every token the demo backend issues.
pub const MOCK_TOKEN_MARKER: &str = "mock_jwt_token";

/// Which backend issued a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenOrigin {
    Real,
    Mock,
}

impl TokenOrigin {
    /// Infers the origin of a token whose provenance was not recorded.
    pub fn infer(token: &str) -> Self {
        if token.contains(MOCK_TOKEN_MARKER) {
            TokenOrigin::Mock
        } else {
            TokenOrigin::Real
        }
    }
}

/// An opaque authentication credential tagged with the backend that issued it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    #[serde(rename = "token")]
    value: String,
    origin: TokenOrigin,
}

impl SessionToken {
    pub fn new(value: impl Into<String>, origin: TokenOrigin) -> Self {
        Self {
            value: value.into(),
            origin,
        }
    }

    /// A token issued by the institutional backend.
    pub fn real(value: impl Into<String>) -> Self {
        Self::new(value, TokenOrigin::Real)
    }

    /// A token issued by the demo backend.
    pub fn mock(value: impl Into<String>) -> Self {
        Self::new(value, TokenOrigin::Mock)
    }

    /// A token of unknown provenance; the origin is inferred from its contents.
    pub fn from_raw(value: impl Into<String>) -> Self {
        let value = value.into();
        let origin = TokenOrigin::infer(&value);
        Self { value, origin }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn origin(&self) -> TokenOrigin {
        self.origin
    }

    pub fn is_mock(&self) -> bool {
        self.origin == TokenOrigin::Mock
    }

    /// Short prefix that is safe to show in logs.
    pub fn redacted(&self) -> String {
        let prefix: String = self.value.chars().take(8).collect();
        format!("{prefix}…")
    }

    pub fn into_inner(self) -> String {
        self.value
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionToken")
            .field("value", &self.redacted())
            .field("origin", &self.origin)
            .finish()
    }
}

/// Durable storage for the single current session token.
///
/// Implementations hold no validation or expiry logic; they are a plain cell.
pub trait TokenStore: Send + Sync {
    /// Persists the token, overwriting any prior value.
    fn set(&self, token: &SessionToken) -> Result<()>;

    /// Reads the current token without side effects.
    fn get(&self) -> Result<Option<SessionToken>>;

    /// Removes the token. Clearing an absent token succeeds.
    fn clear(&self) -> Result<()>;

    /// Whether a token is present. Read failures count as absent.
    fn exists(&self) -> bool {
        matches!(self.get(), Ok(Some(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_origin() {
        assert_eq!(
            TokenOrigin::infer("mock_jwt_token_1700000000000_abc123xyz"),
            TokenOrigin::Mock
        );
        assert_eq!(TokenOrigin::infer("eyJhbGciOiJIUzI1NiJ9.e30"), TokenOrigin::Real);
    }

    #[test]
    fn test_explicit_origin_wins_over_contents() {
        let token = SessionToken::real("prefix-mock_jwt_token-suffix");
        assert!(!token.is_mock());
        assert!(SessionToken::from_raw("prefix-mock_jwt_token-suffix").is_mock());
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = SessionToken::real("abcdefghijklmnopqrstuvwxyz");
        let rendered = format!("{token:?}");
        assert!(rendered.contains("abcdefgh…"));
        assert!(!rendered.contains("xyz"));
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(SessionToken::mock("mock_jwt_token_1_a")).unwrap();
        assert_eq!(value["token"], "mock_jwt_token_1_a");
        assert_eq!(value["origin"], "mock");
    }
}
