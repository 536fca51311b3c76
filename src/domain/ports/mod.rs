//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces the client facade is injected with:
//! - CredentialStore: persistent key-value storage for credentials
//! - Notifier: process-wide publication of client lifecycle events
//!
//! Both are synchronous so they can be called from the request and response
//! stages without awaiting.

pub mod credential_store;
pub mod errors;
pub mod notifier;

pub use credential_store::CredentialStore;
pub use errors::CredentialStoreError;
pub use notifier::Notifier;
