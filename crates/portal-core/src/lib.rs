//! Domain layer of the Campus Portal client.
//!
//! Holds the models exchanged with the university backend, the shared error
//! type, the backend and token-store contracts, and the mode decision rule.

pub mod backend;
pub mod config;
pub mod credentials;
pub mod error;
pub mod mode;
pub mod profile;
pub mod program;
pub mod token;

pub use backend::{AuthGrant, StudentBackend, UserSummary};
pub use config::{MockSettings, PortalConfig};
pub use credentials::Credentials;
pub use error::{PortalError, Result};
pub use mode::{ApiMode, decide_source};
pub use profile::Profile;
pub use program::Program;
pub use token::{MOCK_TOKEN_MARKER, SessionToken, TokenOrigin, TokenStore};
