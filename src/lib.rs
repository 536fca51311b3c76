//! FishPi client - authenticated HTTP facade for the FishPi community API
//!
//! Wraps a single `reqwest` client with:
//! - credential injection supporting both the header-token scheme and the
//!   legacy `apiKey` scheme
//! - centralized handling of the `{code, msg}` response envelope, purging
//!   rejected credentials and broadcasting `fishpi:login-invalid` /
//!   `fishpi:error` events
//! - verb helpers for GET / POST / PUT / DELETE, raw text bodies and
//!   multipart uploads
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): request/response models and port traits
//! - **Infrastructure Layer** (`infrastructure`): HTTP facade, credential
//!   stores, notifiers, configuration, logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fishpi_client::{ApiConfig, BroadcastNotifier, FishpiClient, MemoryCredentialStore};
//!
//! # async fn run() -> Result<(), fishpi_client::RequestError> {
//! let notifier = Arc::new(BroadcastNotifier::new());
//! let mut events = notifier.subscribe();
//! let client = FishpiClient::new(
//!     ApiConfig::default(),
//!     Arc::new(MemoryCredentialStore::new()),
//!     notifier,
//! )?;
//!
//! client.set_api_key("my-key")?;
//! let envelope = client.post_text("/chat-room/send", "hello").await?;
//! # let _ = (envelope, events.try_recv());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::models::{
    ApiConfig, ClientEvent, Config, Credential, HttpMethod, OutgoingRequest, RequestBody,
    RequestOptions, ResponseEnvelope, UploadFile,
};
pub use domain::ports::{CredentialStore, CredentialStoreError, Notifier};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::credentials::{FileCredentialStore, MemoryCredentialStore};
pub use infrastructure::events::{BroadcastNotifier, NullNotifier};
pub use infrastructure::http::{FishpiClient, RequestError};
