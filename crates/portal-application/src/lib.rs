//! Application layer for the Campus Portal client.
//!
//! Coordinates the backends from `portal-interaction` with the token and
//! configuration storage from `portal-infrastructure`.

pub mod gateway;
pub mod session;

pub use gateway::ApiGateway;
pub use session::PortalSession;
