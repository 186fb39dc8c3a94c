//! Storage layer: atomic config files and session token stores.

mod atomic;
mod atomic_toml;
mod memory_token;
mod token_file;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use memory_token::MemoryTokenStore;
pub use token_file::FileTokenStore;
