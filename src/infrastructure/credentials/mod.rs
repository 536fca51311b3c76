//! Credentials management infrastructure
//!
//! Credential store adapters:
//! - In-memory store for tests and ephemeral sessions
//! - JSON-file store persisting the key-value pairs between runs

pub mod file_store;
pub mod memory_store;

pub use file_store::FileCredentialStore;
pub use memory_store::MemoryCredentialStore;
